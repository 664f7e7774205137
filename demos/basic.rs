//! Classify a few sentences against a tiny in-memory corpus.
//!
//! Run with `cargo run --example basic`.

use tf_idf_classifier::{Corpus, DecisionRule, TFIDFVectorizer, Tokenizer};

fn main() {
    let texts = [
        ("space/apollo.txt", "The rocket carried astronauts to the moon."),
        ("space/rover.txt", "A rover landed on Mars to study the soil."),
        ("sport/hockey.txt", "The hockey team scored in overtime to win the cup."),
        ("sport/tennis.txt", "She won the tennis final in three sets."),
        ("medicine/trial.txt", "The trial showed the drug shrinks cancer cells."),
    ];

    let tokenizer = Tokenizer::new();
    let corpus = Corpus::from_texts(texts, &tokenizer);
    let vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(&corpus, tokenizer);

    let queries = [
        "NASA is planning a new mission to the moon and Mars.",
        "The hockey team won the finals in overtime.",
        "This new medicine could help fight cancer cells.",
    ];

    for query in queries {
        println!("Query: {}", query);
        println!("{}", vectorizer.classify(query, &DecisionRule::Nearest));
        println!("{}\n", vectorizer.classify(query, &DecisionRule::Knn(3)));
    }
}
