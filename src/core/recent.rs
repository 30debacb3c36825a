//! Recently opened content ids (most recent first).
//!
//! Also answers "what comes before/after this id" for the control bar's
//! previous/next buttons, wrapping around at both ends.

pub const RECENT_CAP: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct RecentItems {
    items: Vec<String>,
}

impl RecentItems {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Move `id` to the front (dedup), dropping the oldest past the cap.
    pub fn touch(&mut self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }

        self.items.retain(|x| x != id);
        self.items.insert(0, id.to_string());
        self.items.truncate(RECENT_CAP);
    }

    pub fn remove(&mut self, i: usize) -> Option<String> {
        (i < self.items.len()).then(|| self.items.remove(i))
    }

    /// Next/previous only make sense with somewhere else to go.
    pub fn can_step(&self) -> bool {
        self.len() > 1
    }

    /// The id after `current` in list order (wraps). Unknown `current` starts at the top.
    pub fn after(&self, current: Option<&str>) -> Option<&str> {
        if !self.can_step() {
            return None;
        }
        let idx = current
            .and_then(|c| self.items.iter().position(|x| x == c))
            .map(|i| (i + 1) % self.items.len())
            .unwrap_or(0);
        self.items.get(idx).map(String::as_str)
    }

    /// The id before `current` in list order (wraps).
    pub fn before(&self, current: Option<&str>) -> Option<&str> {
        if !self.can_step() {
            return None;
        }
        let idx = match current.and_then(|c| self.items.iter().position(|x| x == c)) {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.items.get(idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[&str]) -> RecentItems {
        let mut r = RecentItems::default();
        for id in ids.iter().rev() {
            r.touch(id);
        }
        r
    }

    #[test]
    fn touch_dedups_and_moves_to_front() {
        let mut r = list(&["a", "b", "c"]);
        r.touch("c");
        assert_eq!(r.items(), ["c", "a", "b"]);
        r.touch("  ");
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn cap_drops_the_oldest() {
        let mut r = RecentItems::default();
        for i in 0..(RECENT_CAP + 5) {
            r.touch(&format!("id{i}"));
        }
        assert_eq!(r.len(), RECENT_CAP);
        assert_eq!(r.items()[0], format!("id{}", RECENT_CAP + 4));
        assert!(!r.items().contains(&"id0".to_string()));
    }

    #[test]
    fn stepping_wraps_around() {
        let r = list(&["a", "b", "c"]);
        assert_eq!(r.after(Some("b")), Some("c"));
        assert_eq!(r.after(Some("c")), Some("a"));
        assert_eq!(r.before(Some("a")), Some("c"));
        assert_eq!(r.before(Some("b")), Some("a"));
        assert_eq!(r.after(Some("zzz")), Some("a"));
    }

    #[test]
    fn single_item_cannot_step() {
        let r = list(&["a"]);
        assert!(!r.can_step());
        assert_eq!(r.after(Some("a")), None);
        assert_eq!(r.before(None), None);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut r = list(&["a", "b"]);
        assert_eq!(r.remove(5), None);
        assert_eq!(r.remove(0).as_deref(), Some("a"));
        assert_eq!(r.items(), ["b"]);
    }
}
