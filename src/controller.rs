/// Bookmark form state and the save/search/settings actions behind the popup buttons
use std::rc::Rc;

use url::Url;

use crate::bookmark::{ActiveTab, BookmarkDraft, DraftField, SavedBookmark};
use crate::config::{Credentials, TrackerConfig};
use crate::error::{BookmarkError, TrackerError, UserAction};
use crate::github::{IssueTracker, TrackerFactory};
use crate::host::{
    ConfigStore, HostError, Navigator, Notifier, TabInspector, open_in_new_tab, options_page_url,
};

const GITHUB_WEB: &str = "https://github.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    /// Terminal for the lifetime of the popup
    Saved,
}

/// Everything the popup form shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookmarkForm {
    pub draft: BookmarkDraft,
    pub config: TrackerConfig,
    pub save_state: SaveState,
    /// "Saved" badge; nothing clears it once set.
    pub show_saved: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    UpdateField(DraftField, String),
    ConfigLoaded(TrackerConfig),
    TabLoaded(ActiveTab),
    SaveStarted,
    SaveFinished { success: bool },
}

/// Snapshot of the draft and settings taken when Save was pressed
#[derive(Debug, Clone, PartialEq)]
pub struct SaveJob {
    pub draft: BookmarkDraft,
    pub config: TrackerConfig,
}

impl BookmarkForm {
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::UpdateField(field, value) => self.draft.update_field(field, value),
            FormAction::ConfigLoaded(config) => self.config = config,
            FormAction::TabLoaded(tab) => self.draft.apply_active_tab(&tab),
            FormAction::SaveStarted => {
                if self.save_state == SaveState::Idle {
                    self.save_state = SaveState::Saving;
                }
            }
            FormAction::SaveFinished { success } => {
                if self.save_state != SaveState::Saving {
                    return;
                }
                if success {
                    self.save_state = SaveState::Saved;
                    self.show_saved = true;
                } else {
                    self.save_state = SaveState::Idle;
                }
            }
        }
    }

    pub fn can_save(&self) -> bool {
        self.save_state == SaveState::Idle
    }

    pub fn job(&self) -> SaveJob {
        SaveJob {
            draft: self.draft.clone(),
            config: self.config.clone(),
        }
    }
}

/// `https://github.com/{owner}/{repo}/issues`
pub fn issues_url(owner: &str, repo: &str) -> String {
    match Url::parse(GITHUB_WEB) {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().extend([owner, repo, "issues"]);
            }
            url.to_string()
        }
        Err(_) => format!("{}/{}/{}/issues", GITHUB_WEB, owner, repo),
    }
}

#[derive(Clone)]
pub struct BookmarkController {
    store: Rc<dyn ConfigStore>,
    tabs: Rc<dyn TabInspector>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    trackers: Rc<dyn TrackerFactory>,
}

impl PartialEq for BookmarkController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
            && Rc::ptr_eq(&self.tabs, &other.tabs)
            && Rc::ptr_eq(&self.navigator, &other.navigator)
            && Rc::ptr_eq(&self.notifier, &other.notifier)
            && Rc::ptr_eq(&self.trackers, &other.trackers)
    }
}

impl BookmarkController {
    pub fn new(
        store: Rc<dyn ConfigStore>,
        tabs: Rc<dyn TabInspector>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        trackers: Rc<dyn TrackerFactory>,
    ) -> Self {
        BookmarkController {
            store,
            tabs,
            navigator,
            notifier,
            trackers,
        }
    }

    /// Best effort: an unreadable store yields an empty config and nothing is shown to the user.
    pub async fn load_config(&self) -> TrackerConfig {
        match self.store.load().await {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Could not read GitHub settings: {}", e);
                TrackerConfig::default()
            }
        }
    }

    pub async fn load_active_tab(&self) -> Option<ActiveTab> {
        match self.tabs.active_tab().await {
            Ok(tab) => tab,
            Err(e) => {
                log::warn!("Could not read active tab: {}", e);
                None
            }
        }
    }

    /// Feed stored settings and the active tab into the form
    pub async fn initialize(&self, dispatch: impl Fn(FormAction)) {
        let config = self.load_config().await;
        dispatch(FormAction::ConfigLoaded(config));
        if let Some(tab) = self.load_active_tab().await {
            dispatch(FormAction::TabLoaded(tab));
        }
    }

    /// Run a save snapshot against the tracker, alerting the user on failure
    pub async fn run_save(&self, job: SaveJob) -> Result<SavedBookmark, BookmarkError> {
        log::info!("Saving bookmark: {} ({})", job.draft.title, job.draft.link);

        let result = self.execute(&job).await;
        match &result {
            Ok(saved) => log::info!("Issue created: {}", saved.issue_url),
            Err(e) => {
                log::error!("Saving bookmark failed [{}]: {}", e.kind(), e);
                self.notifier.alert(&e.alert_message());
            }
        }
        result
    }

    /// Save button flow: `SaveStarted`, the tracker calls, then `SaveFinished`.
    /// Returns `None` without dispatching when `form` is not idle.
    pub async fn submit(
        &self,
        form: &BookmarkForm,
        dispatch: impl Fn(FormAction),
    ) -> Option<Result<SavedBookmark, BookmarkError>> {
        if !form.can_save() {
            return None;
        }
        let job = form.job();
        dispatch(FormAction::SaveStarted);
        let result = self.run_save(job).await;
        dispatch(FormAction::SaveFinished {
            success: result.is_ok(),
        });
        Some(result)
    }

    async fn execute(&self, job: &SaveJob) -> Result<SavedBookmark, BookmarkError> {
        let credentials = job
            .config
            .credentials()
            .ok_or(BookmarkError::ConfigIncomplete(UserAction::Save))?;
        let Credentials { token, owner, repo } = credentials;

        let tracker = self
            .trackers
            .connect(token)
            .map_err(|e| BookmarkError::from_create_failure(&e, owner, repo))?;

        let checked = tracker
            .get_repo(owner, repo)
            .await
            .map_err(|e| BookmarkError::from_repo_check(&e, owner, repo))?;
        log::debug!("Repository {} is reachable", checked.full_name);

        create_bookmark(tracker.as_ref(), owner, repo, &job.draft)
            .await
            .map_err(|e| BookmarkError::from_create_failure(&e, owner, repo))
    }

    /// Open the repository's issue list; returns the URL that was opened
    pub fn search(&self, config: &TrackerConfig) -> Result<String, BookmarkError> {
        let Some((owner, repo)) = config.repository() else {
            let err = BookmarkError::ConfigIncomplete(UserAction::Search);
            self.notifier.alert(&err.alert_message());
            return Err(err);
        };

        let url = issues_url(owner, repo);
        if let Err(e) = open_in_new_tab(self.navigator.as_ref(), &url) {
            log::error!("Failed to open {}: {}", url, e);
        }
        Ok(url)
    }

    pub fn open_settings(&self) -> Result<(), HostError> {
        match self.navigator.open_options_page() {
            Err(HostError::Unsupported(capability)) => {
                let id = self.navigator.extension_id();
                let url = options_page_url(id.as_deref());
                log::debug!("{} missing, opening {} directly", capability, url);
                self.navigator.open_window(&url)
            }
            other => other,
        }
    }
}

/// Issue with the link as body, then the description as a comment when there is one
async fn create_bookmark(
    tracker: &dyn IssueTracker,
    owner: &str,
    repo: &str,
    draft: &BookmarkDraft,
) -> Result<SavedBookmark, TrackerError> {
    let issue = tracker
        .create_issue(owner, repo, &draft.title, &draft.link)
        .await?;

    let commented = match draft.note() {
        Some(note) => {
            let comment = tracker.create_comment(owner, repo, issue.number, note).await?;
            log::debug!("Comment added: {}", comment.html_url);
            true
        }
        None => false,
    };

    Ok(SavedBookmark {
        issue_number: issue.number,
        issue_url: issue.html_url,
        commented,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{ApiComment, ApiIssue, ApiRepo};
    use async_trait::async_trait;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Connect(String),
        GetRepo(String, String),
        CreateIssue { title: String, body: String },
        CreateComment { issue_number: u64, body: String },
    }

    #[derive(Default)]
    struct FakeGitHub {
        calls: Rc<RefCell<Vec<Call>>>,
        repo_error: Option<TrackerError>,
        issue_error: Option<TrackerError>,
        comment_error: Option<TrackerError>,
        issue_number: u64,
    }

    #[async_trait(?Send)]
    impl IssueTracker for FakeGitHub {
        async fn get_repo(&self, owner: &str, repo: &str) -> Result<ApiRepo, TrackerError> {
            self.calls
                .borrow_mut()
                .push(Call::GetRepo(owner.to_string(), repo.to_string()));
            match &self.repo_error {
                Some(e) => Err(e.clone()),
                None => Ok(ApiRepo {
                    full_name: format!("{}/{}", owner, repo),
                }),
            }
        }

        async fn create_issue(
            &self,
            owner: &str,
            repo: &str,
            title: &str,
            body: &str,
        ) -> Result<ApiIssue, TrackerError> {
            self.calls.borrow_mut().push(Call::CreateIssue {
                title: title.to_string(),
                body: body.to_string(),
            });
            match &self.issue_error {
                Some(e) => Err(e.clone()),
                None => Ok(ApiIssue {
                    number: self.issue_number,
                    html_url: format!("https://github.com/{}/{}/issues/{}", owner, repo, self.issue_number),
                }),
            }
        }

        async fn create_comment(
            &self,
            _owner: &str,
            _repo: &str,
            issue_number: u64,
            body: &str,
        ) -> Result<ApiComment, TrackerError> {
            self.calls.borrow_mut().push(Call::CreateComment {
                issue_number,
                body: body.to_string(),
            });
            match &self.comment_error {
                Some(e) => Err(e.clone()),
                None => Ok(ApiComment {
                    html_url: "https://github.com/o/r/issues/1#issuecomment-1".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct FakeConnector {
        calls: Rc<RefCell<Vec<Call>>>,
        repo_error: Option<TrackerError>,
        issue_error: Option<TrackerError>,
        comment_error: Option<TrackerError>,
        issue_number: u64,
    }

    impl TrackerFactory for FakeConnector {
        fn connect(&self, token: &str) -> Result<Box<dyn IssueTracker>, TrackerError> {
            self.calls.borrow_mut().push(Call::Connect(token.to_string()));
            Ok(Box::new(FakeGitHub {
                calls: self.calls.clone(),
                repo_error: self.repo_error.clone(),
                issue_error: self.issue_error.clone(),
                comment_error: self.comment_error.clone(),
                issue_number: self.issue_number,
            }))
        }
    }

    struct FakeStore(Result<TrackerConfig, HostError>);

    #[async_trait(?Send)]
    impl ConfigStore for FakeStore {
        async fn load(&self) -> Result<TrackerConfig, HostError> {
            self.0.clone()
        }

        async fn store(&self, _config: &TrackerConfig) -> Result<(), HostError> {
            Ok(())
        }
    }

    struct FakeTabs(Result<Option<ActiveTab>, HostError>);

    #[async_trait(?Send)]
    impl TabInspector for FakeTabs {
        async fn active_tab(&self) -> Result<Option<ActiveTab>, HostError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct FakeHost {
        tabs_api: bool,
        options_api: bool,
        opened_tabs: RefCell<Vec<String>>,
        opened_windows: RefCell<Vec<String>>,
        options_opened: RefCell<u32>,
        alerts: RefCell<Vec<String>>,
    }

    impl Navigator for FakeHost {
        fn open_tab(&self, url: &str) -> Result<(), HostError> {
            if !self.tabs_api {
                return Err(HostError::Unsupported("chrome.tabs"));
            }
            self.opened_tabs.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn open_window(&self, url: &str) -> Result<(), HostError> {
            self.opened_windows.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn open_options_page(&self) -> Result<(), HostError> {
            if !self.options_api {
                return Err(HostError::Unsupported("chrome.runtime.openOptionsPage"));
            }
            *self.options_opened.borrow_mut() += 1;
            Ok(())
        }

        fn extension_id(&self) -> Option<String> {
            Some("ext-id".to_string())
        }
    }

    impl Notifier for FakeHost {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    struct Harness {
        controller: BookmarkController,
        calls: Rc<RefCell<Vec<Call>>>,
        host: Rc<FakeHost>,
    }

    fn harness_with(connector: FakeConnector, host: FakeHost) -> Harness {
        let calls = connector.calls.clone();
        let host = Rc::new(host);
        let controller = BookmarkController::new(
            Rc::new(FakeStore(Ok(TrackerConfig::default()))),
            Rc::new(FakeTabs(Ok(None))),
            host.clone(),
            host.clone(),
            Rc::new(connector),
        );
        Harness {
            controller,
            calls,
            host,
        }
    }

    fn harness(connector: FakeConnector) -> Harness {
        harness_with(
            connector,
            FakeHost {
                tabs_api: true,
                options_api: true,
                ..FakeHost::default()
            },
        )
    }

    fn example_form(description: &str) -> BookmarkForm {
        BookmarkForm {
            draft: BookmarkDraft {
                link: "https://example.com".to_string(),
                title: "Example".to_string(),
                description: description.to_string(),
                tags: String::new(),
            },
            config: TrackerConfig::new("t", "o", "r"),
            ..BookmarkForm::default()
        }
    }

    fn status(code: u16) -> TrackerError {
        TrackerError::new(Some(code), "request failed")
    }

    /// Runs `submit` the way the popup reducer does and folds the actions back into `form`
    async fn press_save(
        controller: &BookmarkController,
        form: &mut BookmarkForm,
    ) -> (Option<Result<SavedBookmark, BookmarkError>>, Vec<FormAction>) {
        let state = RefCell::new(form.clone());
        let actions = RefCell::new(Vec::new());
        let result = controller
            .submit(form, |action| {
                actions.borrow_mut().push(action.clone());
                state.borrow_mut().apply(action);
            })
            .await;
        *form = state.into_inner();
        (result, actions.into_inner())
    }

    #[test]
    fn test_update_field_action() {
        let mut form = BookmarkForm::default();
        form.apply(FormAction::UpdateField(DraftField::Title, "New".to_string()));

        assert_eq!(form.draft.title, "New");
        assert_eq!(form.draft.link, BookmarkDraft::default().link);
        assert_eq!(form.save_state, SaveState::Idle);
    }

    #[test]
    fn test_save_state_transitions() {
        let mut form = BookmarkForm::default();

        form.apply(FormAction::SaveStarted);
        assert_eq!(form.save_state, SaveState::Saving);
        assert!(!form.can_save());

        form.apply(FormAction::SaveFinished { success: false });
        assert_eq!(form.save_state, SaveState::Idle);
        assert!(!form.show_saved);

        form.apply(FormAction::SaveStarted);
        form.apply(FormAction::SaveFinished { success: true });
        assert_eq!(form.save_state, SaveState::Saved);
        assert!(form.show_saved);

        // Saved is sticky
        form.apply(FormAction::SaveStarted);
        assert_eq!(form.save_state, SaveState::Saved);
        form.apply(FormAction::SaveFinished { success: false });
        assert_eq!(form.save_state, SaveState::Saved);
    }

    #[test]
    fn test_issues_url() {
        assert_eq!(issues_url("o", "r"), "https://github.com/o/r/issues");
        assert_eq!(
            issues_url("rust-lang", "rust.vim"),
            "https://github.com/rust-lang/rust.vim/issues"
        );
    }

    #[tokio::test]
    async fn test_save_with_comment() {
        let h = harness(FakeConnector {
            issue_number: 5,
            ..FakeConnector::default()
        });
        let mut form = example_form("note");

        let result = press_save(&h.controller, &mut form).await.0.unwrap().unwrap();

        assert_eq!(result.issue_number, 5);
        assert!(result.commented);
        assert_eq!(
            *h.calls.borrow(),
            vec![
                Call::Connect("t".to_string()),
                Call::GetRepo("o".to_string(), "r".to_string()),
                Call::CreateIssue {
                    title: "Example".to_string(),
                    body: "https://example.com".to_string(),
                },
                Call::CreateComment {
                    issue_number: 5,
                    body: "note".to_string(),
                },
            ]
        );
        assert_eq!(form.save_state, SaveState::Saved);
        assert!(form.show_saved);
        assert!(h.host.alerts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_save_blank_description_skips_comment() {
        let h = harness(FakeConnector {
            issue_number: 9,
            ..FakeConnector::default()
        });
        let mut form = example_form("   ");

        let result = press_save(&h.controller, &mut form).await.0.unwrap().unwrap();

        assert!(!result.commented);
        assert!(
            !h.calls
                .borrow()
                .iter()
                .any(|c| matches!(c, Call::CreateComment { .. }))
        );
        assert_eq!(form.save_state, SaveState::Saved);
    }

    #[tokio::test]
    async fn test_save_with_empty_config_makes_no_calls() {
        let h = harness(FakeConnector::default());
        let mut form = example_form("note");
        form.config = TrackerConfig::default();

        let result = press_save(&h.controller, &mut form).await.0.unwrap();

        assert_eq!(result, Err(BookmarkError::ConfigIncomplete(UserAction::Save)));
        assert!(h.calls.borrow().is_empty());
        assert_eq!(form.save_state, SaveState::Idle);
        assert_eq!(h.host.alerts.borrow().len(), 1);
        assert!(h.host.alerts.borrow()[0].contains("configuration incomplete"));
    }

    #[tokio::test]
    async fn test_save_with_any_field_missing_makes_no_calls() {
        let configs = [
            TrackerConfig::new("", "o", "r"),
            TrackerConfig::new("t", "", "r"),
            TrackerConfig::new("t", "o", ""),
            TrackerConfig {
                token: Some("t".to_string()),
                owner: Some("o".to_string()),
                repo: None,
            },
        ];

        for config in configs {
            let h = harness(FakeConnector::default());
            let mut form = example_form("note");
            form.config = config;

            let result = press_save(&h.controller, &mut form).await.0.unwrap();

            assert_eq!(result.unwrap_err().kind(), "config_incomplete");
            assert!(h.calls.borrow().is_empty());
            assert_eq!(form.save_state, SaveState::Idle);
        }
    }

    #[tokio::test]
    async fn test_save_repo_not_found_stops_before_issue() {
        let h = harness(FakeConnector {
            repo_error: Some(status(404)),
            ..FakeConnector::default()
        });
        let mut form = example_form("note");

        let result = press_save(&h.controller, &mut form).await.0.unwrap();

        assert_eq!(
            result,
            Err(BookmarkError::RepoNotFound {
                owner: "o".to_string(),
                repo: "r".to_string(),
            })
        );
        assert!(
            !h.calls
                .borrow()
                .iter()
                .any(|c| matches!(c, Call::CreateIssue { .. }))
        );
        assert_eq!(form.save_state, SaveState::Idle);
        assert!(h.host.alerts.borrow()[0].starts_with("Repository not found: o/r"));
    }

    #[tokio::test]
    async fn test_save_repo_access_failure() {
        let h = harness(FakeConnector {
            repo_error: Some(TrackerError::new(None, "Failed to fetch")),
            ..FakeConnector::default()
        });
        let mut form = example_form("");

        let result = press_save(&h.controller, &mut form).await.0.unwrap();

        assert_eq!(
            result,
            Err(BookmarkError::RepoAccessFailed("Failed to fetch".to_string()))
        );
        assert_eq!(form.save_state, SaveState::Idle);
        assert_eq!(
            h.host.alerts.borrow()[0],
            "Failed to access repository: Failed to fetch"
        );
    }

    #[tokio::test]
    async fn test_issue_failures_are_classified() {
        let cases = [
            (Some(401), "unauthorized"),
            (Some(403), "forbidden"),
            (Some(404), "not_found"),
            (Some(422), "unknown"),
            (None, "unknown"),
        ];

        for (code, kind) in cases {
            let h = harness(FakeConnector {
                issue_error: Some(TrackerError::new(code, "nope")),
                ..FakeConnector::default()
            });
            let mut form = example_form("note");

            let result = press_save(&h.controller, &mut form).await.0.unwrap();

            assert_eq!(result.unwrap_err().kind(), kind);
            assert_eq!(form.save_state, SaveState::Idle);
            assert!(!form.show_saved);
            assert!(
                !h.calls
                    .borrow()
                    .iter()
                    .any(|c| matches!(c, Call::CreateComment { .. }))
            );
        }
    }

    #[tokio::test]
    async fn test_comment_failure_uses_same_classification() {
        let h = harness(FakeConnector {
            issue_number: 3,
            comment_error: Some(status(403)),
            ..FakeConnector::default()
        });
        let mut form = example_form("note");

        let result = press_save(&h.controller, &mut form).await.0.unwrap();

        assert_eq!(result, Err(BookmarkError::Forbidden));
        assert_eq!(form.save_state, SaveState::Idle);
    }

    #[tokio::test]
    async fn test_submit_dispatches_started_then_finished() {
        let h = harness(FakeConnector {
            issue_number: 5,
            ..FakeConnector::default()
        });
        let mut form = example_form("");

        let (_, actions) = press_save(&h.controller, &mut form).await;

        assert_eq!(
            actions,
            vec![
                FormAction::SaveStarted,
                FormAction::SaveFinished { success: true },
            ]
        );
        assert_eq!(form.save_state, SaveState::Saved);
        assert!(press_save(&h.controller, &mut form).await.0.is_none());
    }

    #[tokio::test]
    async fn test_submit_failure_returns_form_to_idle() {
        let h = harness(FakeConnector {
            issue_error: Some(status(401)),
            ..FakeConnector::default()
        });
        let mut form = example_form("note");

        let (_, actions) = press_save(&h.controller, &mut form).await;

        assert_eq!(
            actions,
            vec![
                FormAction::SaveStarted,
                FormAction::SaveFinished { success: false },
            ]
        );
        assert!(form.can_save());
    }

    #[tokio::test]
    async fn test_save_refused_while_saving() {
        let h = harness(FakeConnector::default());
        let mut form = example_form("note");
        form.apply(FormAction::SaveStarted);

        let (result, actions) = press_save(&h.controller, &mut form).await;

        assert!(result.is_none());
        assert!(actions.is_empty());
        assert!(h.calls.borrow().is_empty());
    }

    #[test]
    fn test_search_opens_issue_list() {
        let h = harness(FakeConnector::default());

        let url = h.controller.search(&TrackerConfig::new("", "o", "r")).unwrap();

        assert_eq!(url, "https://github.com/o/r/issues");
        assert_eq!(*h.host.opened_tabs.borrow(), vec![url]);
        assert!(h.host.alerts.borrow().is_empty());
    }

    #[test]
    fn test_search_trims_stored_names() {
        let h = harness(FakeConnector::default());

        let url = h.controller.search(&TrackerConfig::new("t", " o ", "r ")).unwrap();

        assert_eq!(url, "https://github.com/o/r/issues");
    }

    #[test]
    fn test_search_without_repo_does_not_navigate() {
        let h = harness(FakeConnector::default());
        let mut config = TrackerConfig::new("t", "o", "r");
        config.repo = None;

        let result = h.controller.search(&config);

        assert_eq!(result, Err(BookmarkError::ConfigIncomplete(UserAction::Search)));
        assert!(h.host.opened_tabs.borrow().is_empty());
        assert!(h.host.opened_windows.borrow().is_empty());
        assert!(h.host.alerts.borrow()[0].contains("before searching bookmarks"));
    }

    #[test]
    fn test_search_falls_back_to_window() {
        let h = harness_with(FakeConnector::default(), FakeHost::default());

        h.controller.search(&TrackerConfig::new("t", "o", "r")).unwrap();

        assert!(h.host.opened_tabs.borrow().is_empty());
        assert_eq!(
            *h.host.opened_windows.borrow(),
            vec!["https://github.com/o/r/issues".to_string()]
        );
    }

    #[test]
    fn test_open_settings_uses_runtime() {
        let h = harness(FakeConnector::default());

        h.controller.open_settings().unwrap();

        assert_eq!(*h.host.options_opened.borrow(), 1);
        assert!(h.host.opened_windows.borrow().is_empty());
    }

    #[test]
    fn test_open_settings_fallback() {
        let h = harness_with(FakeConnector::default(), FakeHost::default());

        h.controller.open_settings().unwrap();

        assert_eq!(
            *h.host.opened_windows.borrow(),
            vec!["chrome-extension://ext-id/options.html".to_string()]
        );
    }

    #[tokio::test]
    async fn test_initialize_applies_config_and_tab() {
        let controller = BookmarkController::new(
            Rc::new(FakeStore(Ok(TrackerConfig::new("t", "o", "r")))),
            Rc::new(FakeTabs(Ok(Some(ActiveTab {
                url: Some("https://blog.rust-lang.org".to_string()),
                title: Some("Rust Blog".to_string()),
            })))),
            Rc::new(FakeHost::default()),
            Rc::new(FakeHost::default()),
            Rc::new(FakeConnector::default()),
        );
        let form = RefCell::new(BookmarkForm::default());
        form.borrow_mut()
            .apply(FormAction::UpdateField(DraftField::Description, "typed early".to_string()));

        controller
            .initialize(|action| form.borrow_mut().apply(action))
            .await;

        let form = form.into_inner();
        assert_eq!(form.config, TrackerConfig::new("t", "o", "r"));
        assert_eq!(form.draft.link, "https://blog.rust-lang.org");
        assert_eq!(form.draft.title, "Rust Blog");
        assert_eq!(form.draft.description, "typed early");
    }

    #[tokio::test]
    async fn test_initialize_tolerates_unavailable_host() {
        let host = Rc::new(FakeHost::default());
        let controller = BookmarkController::new(
            Rc::new(FakeStore(Err(HostError::StoreUnavailable("no sync".to_string())))),
            Rc::new(FakeTabs(Err(HostError::TabsUnavailable("no tabs".to_string())))),
            host.clone(),
            host.clone(),
            Rc::new(FakeConnector::default()),
        );
        let actions = RefCell::new(Vec::new());

        controller
            .initialize(|action| actions.borrow_mut().push(action))
            .await;

        assert_eq!(
            actions.into_inner(),
            vec![FormAction::ConfigLoaded(TrackerConfig::default())]
        );
        assert!(host.alerts.borrow().is_empty());
    }
}
