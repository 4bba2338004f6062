//! Word-level topic index.
//!
//! Topics are split on whitespace and lower-cased, so "Laws of Motion" and
//! "laws of motion" land on the same node. A node is a topic end when some
//! question was filed under exactly that path.

use std::collections::BTreeMap;

use crate::model::{QuestionRecord, QuestionSet};

#[derive(Debug, Default)]
struct TopicNode {
    children: BTreeMap<String, TopicNode>,
    questions: Vec<QuestionRecord>,
    is_topic: bool,
}

/// Trie of topic names to the questions filed under them.
#[derive(Debug, Default)]
pub struct TopicIndex {
    root: TopicNode,
    len: usize,
}

fn words(topic: &str) -> impl Iterator<Item = String> + '_ {
    topic.split_whitespace().map(str::to_lowercase)
}

impl TopicIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over every question in the given sets.
    pub fn from_sets<'a>(sets: impl IntoIterator<Item = &'a QuestionSet>) -> Self {
        let mut index = Self::new();
        for set in sets {
            for q in &set.questions {
                index.insert(&q.topic, q.clone());
            }
        }
        index
    }

    pub fn insert(&mut self, topic: &str, question: QuestionRecord) {
        let mut node = &mut self.root;
        for word in words(topic) {
            node = node.children.entry(word).or_default();
        }
        node.is_topic = true;
        node.questions.push(question);
        self.len += 1;
    }

    /// Number of indexed questions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, topic: &str) -> Option<&TopicNode> {
        let mut node = &self.root;
        for word in words(topic) {
            node = node.children.get(&word)?;
        }
        Some(node)
    }

    /// Questions under `topic` plus those under its direct sub-topics.
    pub fn search(&self, topic: &str) -> Vec<&QuestionRecord> {
        let Some(node) = self.find(topic) else {
            return Vec::new();
        };

        let mut found: Vec<&QuestionRecord> = Vec::new();
        if node.is_topic {
            found.extend(&node.questions);
        }
        for child in node.children.values() {
            if child.is_topic {
                found.extend(&child.questions);
            }
        }
        found
    }

    /// Every topic at or below `prefix`, in lexical order of path.
    pub fn related_topics(&self, prefix: &str) -> Vec<String> {
        let Some(node) = self.find(prefix) else {
            return Vec::new();
        };

        let mut path: Vec<String> = words(prefix).collect();
        let mut topics = Vec::new();
        collect_topics(node, &mut path, &mut topics);
        topics
    }
}

fn collect_topics(node: &TopicNode, path: &mut Vec<String>, out: &mut Vec<String>) {
    if node.is_topic {
        out.push(path.join(" "));
    }
    for (word, child) in &node.children {
        path.push(word.clone());
        collect_topics(child, path, out);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn record(id: &str, topic: &str) -> QuestionRecord {
        QuestionRecord {
            id: id.into(),
            text: format!("question {id}"),
            topic: topic.into(),
            marks: 2,
            difficulty: Difficulty::Medium,
            kind: None,
            section: None,
        }
    }

    fn index() -> TopicIndex {
        let mut index = TopicIndex::new();
        index.insert("Mechanics", record("m1", "Mechanics"));
        index.insert("mechanics kinematics", record("k1", "mechanics kinematics"));
        index.insert("Mechanics Dynamics", record("d1", "Mechanics Dynamics"));
        index.insert(
            "mechanics dynamics friction",
            record("f1", "mechanics dynamics friction"),
        );
        index.insert("Optics", record("o1", "Optics"));
        index
    }

    #[test]
    fn search_includes_direct_children() {
        let index = index();
        let ids: Vec<&str> = index
            .search("MECHANICS")
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "d1", "k1"]);
    }

    #[test]
    fn search_missing_topic_is_empty() {
        assert!(index().search("thermodynamics").is_empty());
        assert!(index().search("optics lenses").is_empty());
    }

    #[test]
    fn related_topics_walks_subtree() {
        let topics = index().related_topics("mechanics");
        assert_eq!(
            topics,
            vec![
                "mechanics",
                "mechanics dynamics",
                "mechanics dynamics friction",
                "mechanics kinematics",
            ]
        );
        assert!(index().related_topics("waves").is_empty());
    }

    #[test]
    fn len_counts_questions() {
        let index = index();
        assert_eq!(index.len(), 5);
        assert!(TopicIndex::new().is_empty());
    }
}
