use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::mode::ModeStack;
use crate::store::NodeStore;
use crate::tree::{
    delete, expand_path, find_siblings, flatten, parent_path, replace_children, DisplayRow,
    ExpandError, ExpandReport, TreeNode,
};
use crate::ui::{ColorScheme, Command, ConfirmAction, InputMode};

/// Shared handle to the note store, cloneable into worker threads.
pub type SharedStore = Arc<dyn NodeStore + Send + Sync>;

/// Application state
pub struct App {
    // Core data: the one partially materialized tree per view session.
    pub tree: Option<TreeNode>,
    pub rows: Vec<DisplayRow>,
    pub current_path: String,

    // View state
    pub selected_index: usize,
    pub scroll_offset: usize,
    /// Rows visible in the tree panel; updated by the renderer each frame.
    pub viewport_height: usize,

    // UI state
    pub color_scheme: ColorScheme,
    pub modes: ModeStack,
    pub goto_input: String,

    // Auxiliary store lookups (read-only, display only)
    pub tags: Vec<String>,
    pub bookmarks: BTreeMap<String, String>,

    // Navigation state
    pub nav_state: NavState,
    pub notice: Option<Notice>,

    // Flags
    pub should_quit: bool,

    max_depth: usize,
    store: SharedStore,
    /// Bumped on every navigation; outcomes carrying an older value are
    /// discarded so a superseded fetch can never overwrite newer data.
    generation: u64,
    outcome_rx: Option<Receiver<NavOutcome>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// A status-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

/// Result of one background navigation, tagged with its generation.
struct NavOutcome {
    generation: u64,
    target: String,
    /// The navigated tree; `None` when even the initial seed fetch failed.
    tree: Option<TreeNode>,
    result: Result<ExpandReport, ExpandError>,
    /// Present only on the seeding navigation.
    tags: Option<Vec<String>>,
    bookmarks: Option<BTreeMap<String, String>>,
}

impl App {
    pub fn new(store: SharedStore, color_scheme: ColorScheme, max_depth: usize) -> Self {
        Self {
            tree: None,
            rows: Vec::new(),
            current_path: String::new(),
            selected_index: 0,
            scroll_offset: 0,
            viewport_height: 0,
            color_scheme,
            modes: ModeStack::new(),
            goto_input: String::new(),
            tags: Vec::new(),
            bookmarks: BTreeMap::new(),
            nav_state: NavState::Idle,
            notice: None,
            should_quit: false,
            max_depth,
            store,
            generation: 0,
            outcome_rx: None,
        }
    }

    /// Navigate to `target`, expanding its ancestor chain from the store on
    /// a background thread. Navigations are serialized by generation: a
    /// newer call makes any outstanding outcome stale.
    pub fn start_navigation(&mut self, target: String) {
        self.generation += 1;
        let generation = self.generation;
        self.nav_state = NavState::Loading;
        self.notice = None;

        let (tx, rx) = mpsc::sync_channel(1);
        self.outcome_rx = Some(rx);

        let store = Arc::clone(&self.store);
        let max_depth = self.max_depth;
        let local_tree = self.tree.clone();

        thread::spawn(move || {
            let outcome = run_navigation(store, local_tree, target, max_depth, generation);
            // The receiver may be gone if a newer navigation replaced it.
            let _ = tx.send(outcome);
        });
    }

    /// Drain finished navigations (non-blocking) and apply current ones.
    pub fn update(&mut self) {
        let mut outcomes = Vec::new();
        let mut disconnected = false;

        if let Some(ref rx) = self.outcome_rx {
            loop {
                match rx.try_recv() {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        for outcome in outcomes {
            self.apply_outcome(outcome);
            disconnected = true;
        }
        if disconnected {
            self.outcome_rx = None;
        }
    }

    /// Patch a finished navigation into the app, unless it is stale.
    fn apply_outcome(&mut self, outcome: NavOutcome) {
        if outcome.generation != self.generation {
            // Superseded while in flight; settled but never patched in.
            return;
        }

        if let Some(tags) = outcome.tags {
            self.tags = tags;
        }
        if let Some(bookmarks) = outcome.bookmarks {
            self.bookmarks = bookmarks;
        }
        if let Some(tree) = outcome.tree {
            self.tree = Some(tree);
        }
        self.refresh_rows();

        match outcome.result {
            Ok(report) => {
                self.nav_state = NavState::Ready;
                self.current_path = outcome.target.clone();
                if !report.fully_revealed() {
                    self.notice = Some(Notice::error(format!(
                        "path {:?} could not be fully revealed (missing locally: {})",
                        outcome.target,
                        report.missing.join(", ")
                    )));
                }
                self.select_path(&outcome.target);
            }
            Err(err) => {
                // Whatever materialized before the failure is still shown.
                self.nav_state = NavState::Failed(err.to_string());
                self.notice = Some(Notice::error(err.to_string()));
            }
        }
    }

    /// Recompute display rows from the tree and clamp the selection.
    pub fn refresh_rows(&mut self) {
        self.rows = match self.tree {
            Some(ref tree) => flatten(tree),
            None => Vec::new(),
        };
        if self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len().saturating_sub(1);
        }
        self.ensure_visible();
    }

    pub fn selected_row(&self) -> Option<&DisplayRow> {
        self.rows.get(self.selected_index)
    }

    /// Move the selection to the row with this path, if it is materialized.
    pub fn select_path(&mut self, path: &str) {
        if let Some(i) = self.rows.iter().position(|r| r.path == path) {
            self.selected_index = i;
            self.ensure_visible();
        }
    }

    fn ensure_visible(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = self.selected_index - self.viewport_height + 1;
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::MoveUp => {
                self.selected_index = self.selected_index.saturating_sub(1);
                self.ensure_visible();
            }
            Command::MoveDown => {
                if self.selected_index + 1 < self.rows.len() {
                    self.selected_index += 1;
                }
                self.ensure_visible();
            }
            Command::PageUp => {
                let page = self.viewport_height.max(1);
                self.selected_index = self.selected_index.saturating_sub(page);
                self.ensure_visible();
            }
            Command::PageDown => {
                let page = self.viewport_height.max(1);
                self.selected_index =
                    (self.selected_index + page).min(self.rows.len().saturating_sub(1));
                self.ensure_visible();
            }
            Command::GotoTop => {
                self.selected_index = 0;
                self.scroll_offset = 0;
            }
            Command::GotoBottom => {
                self.selected_index = self.rows.len().saturating_sub(1);
                self.ensure_visible();
            }
            Command::PrevSibling => {
                let siblings = find_siblings(&self.rows, self.selected_index);
                if let Some(prev) = siblings.prev {
                    self.select_path(&prev);
                }
            }
            Command::NextSibling => {
                let siblings = find_siblings(&self.rows, self.selected_index);
                if let Some(next) = siblings.next {
                    self.select_path(&next);
                }
            }
            Command::GotoParent => {
                let parent = self
                    .selected_row()
                    .and_then(|row| parent_path(&row.path))
                    .map(str::to_string);
                if let Some(parent) = parent {
                    self.select_path(&parent);
                }
            }
            Command::Enter => {
                if let Some(path) = self.selected_row().map(|r| r.path.clone()) {
                    self.start_navigation(path);
                }
            }
            Command::Collapse => self.collapse_selected(),
            Command::Delete => {
                if self.selected_row().is_some_and(|r| !r.path.is_empty()) {
                    self.modes.enter(InputMode::Confirm(ConfirmAction::DeleteNode));
                }
            }
            Command::Confirm => {
                let current = self.modes.current().clone();
                if let InputMode::Confirm(action) = current {
                    self.modes.leave();
                    match action {
                        ConfirmAction::DeleteNode => self.delete_selected(),
                    }
                }
            }
            Command::Cancel => {
                self.modes.leave();
            }
            Command::Refresh => self.start_navigation(self.current_path.clone()),
            Command::StartGoto => {
                self.goto_input.clear();
                self.modes.enter(InputMode::Goto);
            }
            Command::GotoInput(c) => self.goto_input.push(c),
            Command::GotoBackspace => {
                self.goto_input.pop();
            }
            Command::ConfirmGoto => {
                self.modes.leave();
                let target = self.goto_input.clone();
                self.start_navigation(target);
            }
            Command::CancelGoto => {
                self.modes.leave();
                self.goto_input.clear();
            }
            Command::ShowHelp => self.modes.enter(InputMode::Help),
            Command::HideHelp => {
                self.modes.leave();
            }
            Command::Quit => self.should_quit = true,
            Command::Noop => {}
        }
    }

    /// A local edit makes any navigation still in flight stale: its outcome
    /// was computed from a tree snapshot taken before the edit and would
    /// re-materialize the edited branches on arrival.
    fn invalidate_inflight(&mut self) {
        self.generation += 1;
        self.outcome_rx = None;
        if self.nav_state == NavState::Loading {
            self.nav_state = NavState::Idle;
        }
    }

    /// Drop the selected node's loaded children. `replace_children` never
    /// downgrades `has_children`, so the node returns to the lazy sentinel
    /// state and can be re-expanded later.
    fn collapse_selected(&mut self) {
        let Some(path) = self.selected_row().map(|r| r.path.clone()) else {
            return;
        };
        if let Some(ref mut tree) = self.tree {
            if replace_children(tree, &path, Vec::new()).was_applied() {
                self.invalidate_inflight();
            }
            self.refresh_rows();
            self.select_path(&path);
        }
    }

    fn delete_selected(&mut self) {
        let Some(path) = self.selected_row().map(|r| r.path.clone()) else {
            return;
        };
        if let Some(ref mut tree) = self.tree {
            let outcome = delete(tree, &path);
            if outcome.was_applied() {
                self.invalidate_inflight();
                self.notice = Some(Notice::info(format!("removed {:?} from the view", path)));
            } else {
                self.notice =
                    Some(Notice::error(format!("no node at {:?} in the loaded tree", path)));
            }
            self.refresh_rows();
        }
    }
}

/// Worker body: seed the tree on the first navigation, then expand the
/// target's ancestor chain, fetch by fetch.
fn run_navigation(
    store: SharedStore,
    local_tree: Option<TreeNode>,
    target: String,
    max_depth: usize,
    generation: u64,
) -> NavOutcome {
    let (mut tree, tags, bookmarks) = match local_tree {
        Some(tree) => (tree, None, None),
        None => {
            let seeded = store
                .fetch_subtree("", max_depth)
                .map_err(|source| ExpandError::Fetch { path: String::new(), source });
            match seeded {
                Ok(tree) => {
                    // Aux lookups ride along with the seed; failures here
                    // only cost the tag/bookmark bars, never the tree.
                    let tags = store.fetch_tags().ok();
                    let bookmarks = store.fetch_bookmarks().ok();
                    (tree, tags, bookmarks)
                }
                Err(err) => {
                    return NavOutcome {
                        generation,
                        target,
                        tree: None,
                        result: Err(err),
                        tags: None,
                        bookmarks: None,
                    }
                }
            }
        }
    };

    let result = expand_path(&mut tree, store.as_ref(), &target, max_depth);
    NavOutcome { generation, target, tree: Some(tree), result, tags, bookmarks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    struct StubStore;

    impl NodeStore for StubStore {
        fn fetch_subtree(&self, path: &str, _max_depth: usize) -> Result<TreeNode, StoreError> {
            Ok(TreeNode::new(path, "stub"))
        }

        fn fetch_tags(&self) -> Result<Vec<String>, StoreError> {
            Ok(Vec::new())
        }

        fn fetch_bookmarks(&self) -> Result<BTreeMap<String, String>, StoreError> {
            Ok(BTreeMap::new())
        }
    }

    fn node(path: &str, children: Vec<TreeNode>) -> TreeNode {
        let mut n = TreeNode::new(path, format!("node {path}"));
        n.has_children = !children.is_empty();
        n.children = children;
        n
    }

    fn loaded_app() -> App {
        let mut app = App::new(Arc::new(StubStore), ColorScheme::dark(), 2);
        app.tree = Some(node(
            "",
            vec![
                node("1", vec![node("11", vec![]), node("12", vec![])]),
                node("2", vec![]),
            ],
        ));
        app.refresh_rows();
        app
    }

    fn outcome_for(app: &App, target: &str, tree: TreeNode) -> NavOutcome {
        NavOutcome {
            generation: app.generation,
            target: target.to_string(),
            tree: Some(tree),
            result: Ok(ExpandReport::default()),
            tags: None,
            bookmarks: None,
        }
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut app = loaded_app();
        app.generation = 5;

        let stale = NavOutcome {
            generation: 4,
            target: "1".to_string(),
            tree: Some(node("", vec![node("9", vec![])])),
            result: Ok(ExpandReport::default()),
            tags: None,
            bookmarks: None,
        };
        app.apply_outcome(stale);

        // The older navigation settled but never overwrote newer data.
        assert!(app.tree.as_ref().unwrap().find("9").is_none());
        assert!(app.tree.as_ref().unwrap().find("1").is_some());
    }

    #[test]
    fn test_current_outcome_is_adopted() {
        let mut app = loaded_app();
        let fresh = outcome_for(&app, "1", node("", vec![node("1", vec![node("1a", vec![])])]));
        app.apply_outcome(fresh);

        assert!(app.tree.as_ref().unwrap().find("1a").is_some());
        assert_eq!(app.current_path, "1");
        assert_eq!(app.nav_state, NavState::Ready);
        // Selection followed the navigation target.
        assert_eq!(app.selected_row().unwrap().path, "1");
    }

    #[test]
    fn test_partial_reveal_is_surfaced_but_rendered() {
        let mut app = loaded_app();
        let mut outcome = outcome_for(&app, "1", node("", vec![node("1", vec![])]));
        outcome.result = Ok(ExpandReport {
            patched: vec![],
            missing: vec!["1".to_string()],
        });
        app.apply_outcome(outcome);

        assert_eq!(app.nav_state, NavState::Ready);
        assert!(app.notice.as_ref().unwrap().is_error);
        assert!(!app.rows.is_empty());
    }

    #[test]
    fn test_fetch_failure_keeps_partial_tree() {
        let mut app = loaded_app();
        let mut outcome = outcome_for(&app, "12", node("", vec![node("1", vec![])]));
        outcome.result = Err(ExpandError::Fetch {
            path: "12".to_string(),
            source: StoreError::Malformed("boom".to_string()),
        });
        app.apply_outcome(outcome);

        assert!(matches!(app.nav_state, NavState::Failed(_)));
        // The partially expanded tree still renders.
        assert!(!app.rows.is_empty());
        assert!(app.notice.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_sibling_navigation_commands() {
        let mut app = loaded_app();
        app.select_path("11");
        app.handle_command(Command::NextSibling);
        assert_eq!(app.selected_row().unwrap().path, "12");
        app.handle_command(Command::PrevSibling);
        assert_eq!(app.selected_row().unwrap().path, "11");
        app.handle_command(Command::GotoParent);
        assert_eq!(app.selected_row().unwrap().path, "1");
    }

    #[test]
    fn test_collapse_returns_node_to_sentinel() {
        let mut app = loaded_app();
        app.select_path("1");
        app.handle_command(Command::Collapse);

        let one = app.tree.as_ref().unwrap().find("1").unwrap();
        assert!(one.is_unfetched());
        // Rows shrank by the two collapsed children.
        assert_eq!(app.rows.len(), 3);
        assert_eq!(app.selected_row().unwrap().path, "1");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = loaded_app();
        app.select_path("2");
        app.handle_command(Command::Delete);
        assert_eq!(*app.modes.current(), InputMode::Confirm(ConfirmAction::DeleteNode));

        app.handle_command(Command::Cancel);
        assert!(app.tree.as_ref().unwrap().find("2").is_some());

        app.handle_command(Command::Delete);
        app.handle_command(Command::Confirm);
        assert!(app.tree.as_ref().unwrap().find("2").is_none());
        assert_eq!(*app.modes.current(), InputMode::Normal);
    }

    #[test]
    fn test_local_delete_invalidates_inflight_navigation() {
        let mut app = loaded_app();
        // An outcome built before the edit, from a snapshot that still
        // contains "2", as a worker mid-navigation would carry.
        let snapshot = app.tree.clone().unwrap();
        let inflight = outcome_for(&app, "1", snapshot);

        app.select_path("2");
        app.handle_command(Command::Delete);
        app.handle_command(Command::Confirm);
        assert!(app.tree.as_ref().unwrap().find("2").is_none());

        app.apply_outcome(inflight);
        // The pre-edit snapshot never lands; the delete survives.
        assert!(app.tree.as_ref().unwrap().find("2").is_none());
    }

    #[test]
    fn test_local_collapse_invalidates_inflight_navigation() {
        let mut app = loaded_app();
        app.nav_state = NavState::Loading;
        let snapshot = app.tree.clone().unwrap();
        let inflight = outcome_for(&app, "11", snapshot);

        app.select_path("1");
        app.handle_command(Command::Collapse);
        // The edit cancels the pending navigation outright.
        assert_eq!(app.nav_state, NavState::Idle);
        assert!(app.tree.as_ref().unwrap().find("1").unwrap().is_unfetched());

        app.apply_outcome(inflight);
        assert!(app.tree.as_ref().unwrap().find("11").is_none());
    }

    #[test]
    fn test_goto_input_mode() {
        let mut app = loaded_app();
        app.handle_command(Command::StartGoto);
        assert_eq!(*app.modes.current(), InputMode::Goto);
        app.handle_command(Command::GotoInput('1'));
        app.handle_command(Command::GotoInput('2'));
        app.handle_command(Command::GotoBackspace);
        assert_eq!(app.goto_input, "1");

        app.handle_command(Command::ConfirmGoto);
        assert_eq!(*app.modes.current(), InputMode::Normal);
        assert_eq!(app.nav_state, NavState::Loading);
    }
}
