//! Screen navigation history.

use tokio::sync::RwLock;

/// Stack-based screen history.
///
/// The stack never empties once an app is loaded: `go_back` at the
/// floor is a no-op, so the entry screen is never poppable. Pushes are
/// unconditional — dangling screen ids are resolved (with fallback) at
/// render time, not here.
pub struct NavigationController {
    stack: RwLock<Vec<String>>,
}

impl NavigationController {
    /// Create an empty controller; [`reset`](Self::reset) seeds it
    /// when an app is loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: RwLock::new(Vec::new()),
        }
    }

    /// Replace the whole history with a new entry screen.
    pub async fn reset(&self, entry_screen: String) {
        let mut stack = self.stack.write().await;
        stack.clear();
        stack.push(entry_screen);
    }

    /// Push a screen onto the history.
    pub async fn navigate_to(&self, screen_id: &str) {
        self.stack.write().await.push(screen_id.to_string());
    }

    /// Pop the current screen; no-op at the stack floor.
    ///
    /// Returns whether a pop actually happened.
    pub async fn go_back(&self) -> bool {
        let mut stack = self.stack.write().await;
        if stack.len() > 1 {
            stack.pop();
            true
        } else {
            false
        }
    }

    /// The current screen id, once an app is loaded.
    pub async fn current(&self) -> Option<String> {
        self.stack.read().await.last().cloned()
    }

    /// History depth.
    pub async fn depth(&self) -> usize {
        self.stack.read().await.len()
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn go_back_at_floor_is_a_no_op() {
        let nav = NavigationController::new();
        nav.reset("home".to_string()).await;

        assert!(!nav.go_back().await);
        assert_eq!(nav.depth().await, 1);
        assert_eq!(nav.current().await.as_deref(), Some("home"));
    }

    #[tokio::test]
    async fn navigate_grows_history_by_one() {
        let nav = NavigationController::new();
        nav.reset("home".to_string()).await;

        nav.navigate_to("register").await;
        assert_eq!(nav.depth().await, 2);
        assert_eq!(nav.current().await.as_deref(), Some("register"));

        // Unconditional push, even for ids no screen declares.
        nav.navigate_to("nowhere").await;
        assert_eq!(nav.depth().await, 3);
        assert_eq!(nav.current().await.as_deref(), Some("nowhere"));
    }

    #[tokio::test]
    async fn go_back_pops_to_the_previous_screen() {
        let nav = NavigationController::new();
        nav.reset("home".to_string()).await;
        nav.navigate_to("register").await;

        assert!(nav.go_back().await);
        assert_eq!(nav.current().await.as_deref(), Some("home"));
    }

    #[tokio::test]
    async fn reset_replaces_history() {
        let nav = NavigationController::new();
        nav.reset("home".to_string()).await;
        nav.navigate_to("register").await;

        nav.reset("welcome".to_string()).await;
        assert_eq!(nav.depth().await, 1);
        assert_eq!(nav.current().await.as_deref(), Some("welcome"));
    }
}
