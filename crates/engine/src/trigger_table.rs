//! TriggerTableEngine - a small reference ReplyEngine
//!
//! Knowledge files are line based:
//!
//! ```text
//! // comment
//! + hello bot
//! - Hello, human!
//!
//! + my name is *
//! - Nice to meet you, <star>.
//! - Hi <star>!
//! ```
//!
//! `+` opens a trigger, each following `-` adds a reply to it. `*` matches
//! one or more words and is echoed through `<star>` (or `<star1>`,
//! `<star2>`, ...). A trigger with several replies hands them out in turn,
//! tracked per user. This is not RiveScript; it covers just enough for the
//! host binary and for exercising the bridge end to end.

use crate::adapter::{LoadResult, ReplyEngine};
use crate::source::{self, KnowledgeFile};
use async_trait::async_trait;
use regex::Regex;
use shared::{BatchId, KnowledgeSource, LoadError};
use std::collections::HashMap;
use std::path::Path;

/// Reply given when no trigger matches
pub const NO_REPLY: &str = "ERR: No Reply Matched";

#[derive(Debug, Clone)]
struct Trigger {
    pattern: String,
    matcher: Regex,
    replies: Vec<String>,
}

impl Trigger {
    fn new(pattern: String, path: &Path, line: usize) -> Result<Self, LoadError> {
        let matcher = compile(&pattern).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            line,
            detail: e.to_string(),
        })?;
        Ok(Self {
            pattern,
            matcher,
            replies: Vec::new(),
        })
    }

    fn wildcards(&self) -> usize {
        self.pattern.split(' ').filter(|w| *w == "*").count()
    }

    fn words(&self) -> usize {
        self.pattern.split(' ').filter(|w| *w != "*").count()
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    let body: Vec<String> = pattern
        .split(' ')
        .map(|word| {
            if word == "*" {
                "(.+?)".to_string()
            } else {
                regex::escape(word)
            }
        })
        .collect();
    Regex::new(&format!("^{}$", body.join(" ")))
}

/// Lowercase, drop punctuation, collapse whitespace
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '*' || c == '\'' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse one file into triggers
fn parse(file: &KnowledgeFile) -> Result<Vec<Trigger>, LoadError> {
    let mut triggers: Vec<Trigger> = Vec::new();
    let mut opened_at = 0;

    let parse_error = |line: usize, detail: String| LoadError::Parse {
        path: file.path.clone(),
        line,
        detail,
    };

    for (index, raw) in file.content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let mut chars = line.chars();
        let command = chars.next().unwrap_or_default();
        let rest = chars.as_str().trim();

        match command {
            '+' => {
                if let Some(last) = triggers.last() {
                    if last.replies.is_empty() {
                        return Err(parse_error(
                            opened_at,
                            format!("trigger '{}' has no reply", last.pattern),
                        ));
                    }
                }
                let pattern = normalize(rest);
                if pattern.is_empty() {
                    return Err(parse_error(line_no, "empty trigger".to_string()));
                }
                triggers.push(Trigger::new(pattern, &file.path, line_no)?);
                opened_at = line_no;
            }
            '-' => match triggers.last_mut() {
                Some(trigger) => trigger.replies.push(rest.to_string()),
                None => {
                    return Err(parse_error(line_no, "reply without a trigger".to_string()));
                }
            },
            other => {
                return Err(parse_error(
                    line_no,
                    format!("unrecognised command '{}'", other),
                ));
            }
        }
    }

    if let Some(last) = triggers.last() {
        if last.replies.is_empty() {
            return Err(parse_error(
                opened_at,
                format!("trigger '{}' has no reply", last.pattern),
            ));
        }
    }

    Ok(triggers)
}

fn substitute_stars(reply: &str, stars: &[&str]) -> String {
    let mut out = reply.to_string();
    for (i, star) in stars.iter().enumerate().rev() {
        out = out.replace(&format!("<star{}>", i + 1), star);
    }
    if let Some(first) = stars.first() {
        out = out.replace("<star>", first);
    }
    out
}

/// Reference engine backed by a sorted table of triggers
#[derive(Debug, Default)]
pub struct TriggerTableEngine {
    triggers: Vec<Trigger>,
    loads: u64,
    sorted: bool,
    /// user -> trigger pattern -> replies handed out so far
    rotation: HashMap<String, HashMap<String, usize>>,
}

impl TriggerTableEngine {
    /// Create an engine with no knowledge
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct triggers registered
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Whether the reply set has been finalized since the last load
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Registered trigger patterns, in matching order
    pub fn patterns(&self) -> Vec<&str> {
        self.triggers.iter().map(|t| t.pattern.as_str()).collect()
    }

    fn register(&mut self, staged: Vec<Trigger>) {
        for trigger in staged {
            match self.triggers.iter_mut().find(|t| t.pattern == trigger.pattern) {
                Some(existing) => existing.replies.extend(trigger.replies),
                None => self.triggers.push(trigger),
            }
        }
        self.sorted = false;
    }

    fn next_reply_index(&mut self, user: &str, slot: usize) -> usize {
        let trigger = &self.triggers[slot];
        let served = self
            .rotation
            .entry(user.to_string())
            .or_default()
            .entry(trigger.pattern.clone())
            .or_insert(0);
        let index = *served % trigger.replies.len();
        *served += 1;
        index
    }
}

#[async_trait]
impl ReplyEngine for TriggerTableEngine {
    async fn load_knowledge(&mut self, sources: &KnowledgeSource) -> LoadResult {
        let batch = BatchId(self.loads);
        self.loads += 1;

        let paths = source::resolve(sources).await?;
        let files = source::read_all(&paths).await?;

        // Parse everything before touching the table so a bad file leaves
        // earlier batches intact.
        let mut staged = Vec::new();
        for file in &files {
            staged.extend(parse(file)?);
        }

        tracing::debug!(batch = %batch, files = files.len(), triggers = staged.len(), "Knowledge parsed");
        self.register(staged);
        Ok(batch)
    }

    fn finalize(&mut self) {
        // Plain triggers before wildcard ones, then longer before shorter
        self.triggers.sort_by(|a, b| {
            a.wildcards()
                .cmp(&b.wildcards())
                .then(b.words().cmp(&a.words()))
                .then(b.pattern.len().cmp(&a.pattern.len()))
                .then(a.pattern.cmp(&b.pattern))
        });
        self.sorted = true;
    }

    fn get_reply(&mut self, user: &str, text: &str) -> String {
        let input = normalize(text);

        let matched = self.triggers.iter().enumerate().find_map(|(slot, trigger)| {
            trigger.matcher.captures(&input).map(|caps| {
                let stars: Vec<String> = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str().to_string())
                    .collect();
                (slot, stars)
            })
        });

        match matched {
            Some((slot, stars)) => {
                let index = self.next_reply_index(user, slot);
                let stars: Vec<&str> = stars.iter().map(String::as_str).collect();
                substitute_stars(&self.triggers[slot].replies[index], &stars)
            }
            None => NO_REPLY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(content: &str) -> KnowledgeFile {
        KnowledgeFile {
            path: PathBuf::from("test.rive"),
            content: content.to_string(),
        }
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    async fn loaded(content: &str) -> TriggerTableEngine {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "brain.rive", content);
        let mut engine = TriggerTableEngine::new();
        engine
            .load_knowledge(&KnowledgeSource::files([path]))
            .await
            .unwrap();
        engine.finalize();
        engine
    }

    // ============== Parsing Tests ==============

    #[test]
    fn test_parse_pairs() {
        let triggers = parse(&file("// greeting\n+ Hello Bot!\n- Hi.\n- Hey.\n\n+ bye\n- Bye.\n")).unwrap();
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0].pattern, "hello bot");
        assert_eq!(triggers[0].replies, vec!["Hi.", "Hey."]);
    }

    #[test]
    fn test_parse_reply_without_trigger() {
        let err = parse(&file("- orphan\n")).unwrap_err();
        assert!(err.to_string().contains("line 1"));
        assert!(err.to_string().contains("reply without a trigger"));
    }

    #[test]
    fn test_parse_trigger_without_reply() {
        let err = parse(&file("+ first\n+ second\n- reply\n")).unwrap_err();
        assert!(err.to_string().contains("'first' has no reply"));

        let err = parse(&file("+ dangling\n")).unwrap_err();
        assert!(err.to_string().contains("'dangling' has no reply"));
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse(&file("+ hi\n- hello\n! version = 2.0\n")).unwrap_err();
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("unrecognised command '!'"));
    }

    #[test]
    fn test_parse_empty_trigger() {
        let err = parse(&file("+ ?!\n- what\n")).unwrap_err();
        assert!(err.to_string().contains("empty trigger"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello,   WORLD!! "), "hello world");
        assert_eq!(normalize("what's up?"), "what's up");
    }

    // ============== Loading Tests ==============

    #[tokio::test]
    async fn test_empty_load_reports_batch() {
        let mut engine = TriggerTableEngine::new();
        let batch = engine.load_knowledge(&KnowledgeSource::empty()).await.unwrap();
        assert_eq!(batch, BatchId(0));
        assert_eq!(engine.trigger_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_ids_increase_per_load() {
        let mut engine = TriggerTableEngine::new();
        let first = engine.load_knowledge(&KnowledgeSource::empty()).await.unwrap();
        let _ = engine
            .load_knowledge(&KnowledgeSource::files(["/nonexistent/x.rive"]))
            .await;
        let third = engine.load_knowledge(&KnowledgeSource::empty()).await.unwrap();
        assert_eq!(first, BatchId(0));
        assert_eq!(third, BatchId(2));
    }

    #[tokio::test]
    async fn test_failed_batch_registers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.rive", "+ hi\n- hello\n");
        let bad = write(dir.path(), "bad.rive", "- orphan\n");

        let mut engine = TriggerTableEngine::new();
        let result = engine
            .load_knowledge(&KnowledgeSource::files([good, bad]))
            .await;

        assert!(matches!(result, Err(LoadError::Parse { .. })));
        assert_eq!(engine.trigger_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_unreadable() {
        let mut engine = TriggerTableEngine::new();
        let err = engine
            .load_knowledge(&KnowledgeSource::files(["missing.rive"]))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
        assert!(!err.detail().is_empty());
    }

    #[tokio::test]
    async fn test_directory_load() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.rive", "+ hi\n- hello\n");
        write(dir.path(), "b.rive", "+ bye\n- goodbye\n");

        let mut engine = TriggerTableEngine::new();
        engine
            .load_knowledge(&KnowledgeSource::directory(dir.path()))
            .await
            .unwrap();
        engine.finalize();

        assert_eq!(engine.trigger_count(), 2);
        assert_eq!(engine.get_reply("u", "bye"), "goodbye");
    }

    #[tokio::test]
    async fn test_duplicate_triggers_merge_replies() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.rive", "+ hi\n- one\n");
        let b = write(dir.path(), "b.rive", "+ HI\n- two\n");

        let mut engine = TriggerTableEngine::new();
        engine.load_knowledge(&KnowledgeSource::files([a, b])).await.unwrap();
        engine.finalize();

        assert_eq!(engine.trigger_count(), 1);
        assert_eq!(engine.get_reply("u", "hi"), "one");
        assert_eq!(engine.get_reply("u", "hi"), "two");
    }

    #[tokio::test]
    async fn test_load_clears_sorted_flag() {
        let mut engine = TriggerTableEngine::new();
        engine.load_knowledge(&KnowledgeSource::empty()).await.unwrap();
        engine.finalize();
        assert!(engine.is_sorted());

        engine.load_knowledge(&KnowledgeSource::empty()).await.unwrap();
        assert!(!engine.is_sorted());
    }

    // ============== Reply Tests ==============

    #[tokio::test]
    async fn test_finalize_orders_specific_first() {
        let engine = loaded("+ *\n- fallback\n+ hello *\n- hi <star>\n+ hello there\n- exact\n+ hello\n- short\n").await;
        assert_eq!(engine.patterns(), vec!["hello there", "hello", "hello *", "*"]);
    }

    #[tokio::test]
    async fn test_wildcard_capture() {
        let mut engine = loaded("+ my name is *\n- Nice to meet you, <star>.\n+ * likes *\n- <star2> is liked by <star1>\n").await;
        assert_eq!(engine.get_reply("u", "My name is Ada Lovelace"), "Nice to meet you, ada lovelace.");
        assert_eq!(engine.get_reply("u", "bob likes tea"), "tea is liked by bob");
    }

    #[tokio::test]
    async fn test_no_match() {
        let mut engine = loaded("+ hi\n- hello\n").await;
        assert_eq!(engine.get_reply("u", "something else"), NO_REPLY);
        assert_eq!(engine.get_reply("u", ""), NO_REPLY);
    }

    #[tokio::test]
    async fn test_rotation_is_per_user() {
        let mut engine = loaded("+ hi\n- one\n- two\n").await;
        assert_eq!(engine.get_reply("alice", "hi"), "one");
        assert_eq!(engine.get_reply("alice", "hi"), "two");
        assert_eq!(engine.get_reply("bob", "hi"), "one");
        assert_eq!(engine.get_reply("alice", "hi"), "one");
    }

    #[tokio::test]
    async fn test_rotation_follows_sorted_trigger() {
        let mut engine = loaded("+ *\n- what?\n- pardon?\n+ hi *\n- hey <star>\n- yo <star>\n").await;
        assert_eq!(engine.get_reply("ann", "hi bob"), "hey bob");
        assert_eq!(engine.get_reply("ann", "anything"), "what?");
        assert_eq!(engine.get_reply("ann", "hi cat"), "yo cat");
        assert_eq!(engine.get_reply("ann", "more"), "pardon?");
    }

    #[test]
    fn test_substitute_stars_numbered() {
        assert_eq!(substitute_stars("<star1>-<star2>-<star>", &["a", "b"]), "a-b-a");
        assert_eq!(substitute_stars("no stars", &[]), "no stars");
    }
}
