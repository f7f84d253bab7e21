use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

const MAX_ACTIVITY_LINES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Info,
    Source,
    File,
    Mode,
    Submit,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub text: String,
    pub kind: Kind,
}

static ACTIVITY_LOG: Lazy<Mutex<VecDeque<Entry>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(MAX_ACTIVITY_LINES)));

pub fn log<T: Into<String>>(line: T) {
    log_with(Kind::Info, line);
}

pub fn log_with<T: Into<String>>(kind: Kind, line: T) {
    let text = line.into();
    tracing::trace!(?kind, "{text}");
    if let Ok(mut buf) = ACTIVITY_LOG.lock() {
        if buf.len() >= MAX_ACTIVITY_LINES {
            buf.pop_front();
        }
        buf.push_back(Entry { text, kind });
    }
}

pub fn recent(n: usize) -> Vec<Entry> {
    if let Ok(buf) = ACTIVITY_LOG.lock() {
        let len = buf.len();
        let take = n.min(len);
        buf.iter().skip(len - take).cloned().collect()
    } else {
        Vec::new()
    }
}

pub fn latest() -> Option<Entry> {
    recent(1).pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The buffer is shared by every test in the process, so only assert on
    // entries this test wrote.
    #[test]
    fn test_log_is_bounded_and_ordered() {
        for i in 0..(MAX_ACTIVITY_LINES + 5) {
            log_with(Kind::Source, format!("bounded {i}"));
        }
        log("bounded last");

        let all = recent(usize::MAX);
        assert!(all.len() <= MAX_ACTIVITY_LINES);
        let ours: Vec<_> = all.iter().filter(|e| e.text.starts_with("bounded")).collect();
        assert!(ours.iter().all(|e| e.text != "bounded 0"));
        let last = ours.last().map(|e| (e.text.as_str(), e.kind));
        assert_eq!(last, Some(("bounded last", Kind::Info)));
    }
}
