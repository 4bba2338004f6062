//! The `qeval topics` command.

use std::path::PathBuf;

use anyhow::Result;

use qeval_core::parser;
use qeval_core::topics::TopicIndex;

pub fn execute(questions_path: PathBuf, prefix: String, search: Option<String>) -> Result<()> {
    let sets = parser::load_question_sets(&questions_path)?;
    let index = TopicIndex::from_sets(&sets);

    if let Some(topic) = search {
        let found = index.search(&topic);
        if found.is_empty() {
            println!("No questions under '{topic}'.");
        }
        for q in found {
            println!(
                "  {} [{}] {} marks, {}: {}",
                q.id, q.topic, q.marks, q.difficulty, q.text
            );
        }
        return Ok(());
    }

    let topics = index.related_topics(&prefix);
    if topics.is_empty() {
        println!("No topics found.");
    }
    for topic in &topics {
        println!("  {topic}");
    }

    Ok(())
}
