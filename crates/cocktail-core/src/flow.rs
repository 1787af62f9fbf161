// ── Search-and-display flow ──
//
// validate → fetch → transform → render. The flow owns the labels it last
// rendered so a selection by index can be echoed back without asking the
// presenter. Every fetch failure renders exactly like "no matches".

use cocktail_api::SearchResponse;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::query::Query;
use crate::source::CocktailSource;

/// Shown when the input is not exactly one letter.
pub const INVALID_QUERY_MESSAGE: &str = "Please enter a single letter.";

/// Shown when the service has no matches or could not be reached.
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

/// What a fetch produced: an envelope, the absent marker, or a fault.
pub type FetchOutcome = Result<Option<SearchResponse>, CoreError>;

/// Output side of the flow. Implemented by whatever draws the window.
pub trait Presenter {
    /// Replace the whole results list.
    fn render_results(&mut self, labels: &[String]);

    /// Replace the detail area's content.
    fn render_detail(&mut self, text: &str);
}

/// Where the flow is in its search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    /// Nothing searched yet, or the last submit was rejected.
    #[default]
    Idle,
    /// A valid query was submitted; its outcome hasn't arrived.
    Searching,
    /// Results reflect the latest fetch; detail is empty.
    Populated,
    /// Detail mirrors the selected label.
    DetailShown,
}

/// Handle for one accepted search. Only the most recently issued ticket
/// can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: Query,
}

impl SearchTicket {
    pub fn query(&self) -> Query {
        self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The search-and-display state machine.
#[derive(Debug)]
pub struct SearchFlow<P> {
    presenter: P,
    results: Vec<String>,
    selected: Option<usize>,
    state: FlowState,
    generation: u64,
    pending: Option<SearchTicket>,
}

impl<P: Presenter> SearchFlow<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            results: Vec::new(),
            selected: None,
            state: FlowState::Idle,
            generation: 0,
            pending: None,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Labels currently in the results list.
    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The search still waiting for its outcome, if any.
    pub fn pending(&self) -> Option<SearchTicket> {
        self.pending
    }

    // ── Entry points ─────────────────────────────────────────────────

    /// Handle a search action.
    ///
    /// Invalid input renders [`INVALID_QUERY_MESSAGE`] as the only list entry
    /// and leaves the detail area alone. Valid input clears both areas and
    /// returns the ticket the caller must fetch for. Either way any search
    /// still in flight is superseded.
    pub fn submit(&mut self, input: &str) -> Option<SearchTicket> {
        self.generation += 1;
        self.selected = None;

        match Query::parse(input) {
            Err(e) => {
                debug!(error = %e, "rejecting search input");
                self.pending = None;
                self.state = FlowState::Idle;
                self.show_results(vec![INVALID_QUERY_MESSAGE.to_owned()]);
                None
            }
            Ok(query) => {
                let ticket = SearchTicket {
                    generation: self.generation,
                    query,
                };
                debug!(%query, generation = ticket.generation, "search submitted");
                self.pending = Some(ticket);
                self.state = FlowState::Searching;
                self.show_results(Vec::new());
                self.presenter.render_detail("");
                Some(ticket)
            }
        }
    }

    /// Render the outcome of the fetch for `ticket`.
    ///
    /// Returns `false` (and renders nothing) when `ticket` has been
    /// superseded by a later submit.
    pub fn complete(&mut self, ticket: SearchTicket, outcome: &FetchOutcome) -> bool {
        if self.pending != Some(ticket) {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale search outcome"
            );
            return false;
        }
        self.pending = None;

        let mut labels: Vec<String> = match outcome {
            Ok(Some(envelope)) => envelope.drink_names().map(str::to_owned).collect(),
            Ok(None) => {
                debug!(query = %ticket.query, "search service returned no envelope");
                Vec::new()
            }
            Err(e) => {
                warn!(query = %ticket.query, error = %e, "search failed; showing no results");
                Vec::new()
            }
        };
        if labels.is_empty() {
            labels.push(NO_RESULTS_MESSAGE.to_owned());
        }

        self.selected = None;
        self.state = FlowState::Populated;
        self.presenter.render_detail("");
        self.show_results(labels);
        true
    }

    /// Submit, fetch once from `source`, and render in one call.
    pub async fn search<S: CocktailSource>(&mut self, source: &S, input: &str) -> &[String] {
        if let Some(ticket) = self.submit(input) {
            let outcome = source.fetch(ticket.query()).await;
            self.complete(ticket, &outcome);
        }
        &self.results
    }

    /// Handle a selection by list position. Echoes the label into the
    /// detail area and returns it; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        let label = self.results.get(index)?.clone();
        self.selected = Some(index);
        self.state = FlowState::DetailShown;
        self.presenter.render_detail(&label);
        self.results.get(index).map(String::as_str)
    }

    /// Handle a selection reported by label. The text is written verbatim.
    pub fn select_label(&mut self, label: &str) {
        self.selected = self.results.iter().position(|l| l == label);
        self.state = FlowState::DetailShown;
        self.presenter.render_detail(label);
    }

    fn show_results(&mut self, labels: Vec<String>) {
        self.results = labels;
        self.presenter.render_results(&self.results);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    // ── Test doubles ────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Render {
        Results(Vec<String>),
        Detail(String),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Render>,
    }

    impl Recorder {
        fn last_results(&self) -> Option<&[String]> {
            self.calls.iter().rev().find_map(|c| match c {
                Render::Results(r) => Some(r.as_slice()),
                Render::Detail(_) => None,
            })
        }

        fn last_detail(&self) -> Option<&str> {
            self.calls.iter().rev().find_map(|c| match c {
                Render::Detail(d) => Some(d.as_str()),
                Render::Results(_) => None,
            })
        }
    }

    impl Presenter for Recorder {
        fn render_results(&mut self, labels: &[String]) {
            self.calls.push(Render::Results(labels.to_vec()));
        }

        fn render_detail(&mut self, text: &str) {
            self.calls.push(Render::Detail(text.to_owned()));
        }
    }

    enum Reply {
        Envelope(serde_json::Value),
        Absent,
        Fail,
    }

    struct FakeSource {
        reply: Reply,
        calls: Mutex<Vec<char>>,
    }

    impl FakeSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<char> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CocktailSource for FakeSource {
        async fn fetch(&self, query: Query) -> FetchOutcome {
            self.calls.lock().unwrap().push(query.letter());
            match &self.reply {
                Reply::Envelope(v) => Ok(Some(serde_json::from_value(v.clone()).unwrap())),
                Reply::Absent => Ok(None),
                Reply::Fail => Err(CoreError::Timeout),
            }
        }
    }

    fn two_drinks() -> Reply {
        Reply::Envelope(json!({
            "drinks": [{ "strDrink": "Margarita" }, { "strDrink": "Mojito" }]
        }))
    }

    fn flow() -> SearchFlow<Recorder> {
        SearchFlow::new(Recorder::default())
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    // ── Validation ──────────────────────────────────────────────────

    #[test]
    fn valid_letter_fetches_once_lowercased() {
        for input in ["m", "M", "  m  "] {
            let source = FakeSource::new(two_drinks());
            let mut flow = flow();
            tokio_test::block_on(flow.search(&source, input));
            assert_eq!(source.calls(), vec!['m'], "input {input:?}");
        }
    }

    #[test]
    fn invalid_input_never_fetches() {
        for input in ["", "  ", "ab", "1", "?", "m m"] {
            let source = FakeSource::new(two_drinks());
            let mut flow = flow();
            let results = tokio_test::block_on(flow.search(&source, input)).to_vec();
            assert!(source.calls().is_empty(), "input {input:?} fetched");
            assert_eq!(results, labels(&[INVALID_QUERY_MESSAGE]));
            assert_eq!(
                flow.presenter().last_results(),
                Some(labels(&[INVALID_QUERY_MESSAGE]).as_slice())
            );
            assert_eq!(flow.state(), FlowState::Idle);
        }
    }

    #[test]
    fn invalid_input_leaves_detail_untouched() {
        let source = FakeSource::new(two_drinks());
        let mut flow = flow();
        tokio_test::block_on(flow.search(&source, "m"));
        flow.select(1);
        tokio_test::block_on(flow.search(&source, "12"));

        assert_eq!(flow.presenter().last_detail(), Some("Mojito"));
        assert_eq!(flow.selected(), None);
    }

    // ── Transform ───────────────────────────────────────────────────

    #[test]
    fn drinks_render_in_server_order() {
        let source = FakeSource::new(two_drinks());
        let mut flow = flow();
        let results = tokio_test::block_on(flow.search(&source, "m")).to_vec();
        assert_eq!(results, labels(&["Margarita", "Mojito"]));
        assert_eq!(flow.state(), FlowState::Populated);
    }

    #[test]
    fn duplicates_are_kept() {
        let source = FakeSource::new(Reply::Envelope(json!({
            "drinks": [{ "strDrink": "B" }, { "strDrink": "A" }, { "strDrink": "B" }]
        })));
        let mut flow = flow();
        let results = tokio_test::block_on(flow.search(&source, "b")).to_vec();
        assert_eq!(results, labels(&["B", "A", "B"]));
    }

    #[test]
    fn empty_outcomes_render_no_results() {
        let replies = [
            Reply::Absent,
            Reply::Envelope(json!({ "drinks": null })),
            Reply::Envelope(json!({})),
            Reply::Envelope(json!({ "drinks": [] })),
            Reply::Fail,
        ];
        for reply in replies {
            let source = FakeSource::new(reply);
            let mut flow = flow();
            let results = tokio_test::block_on(flow.search(&source, "x")).to_vec();
            assert_eq!(results, labels(&[NO_RESULTS_MESSAGE]));
            assert_eq!(source.calls().len(), 1);
        }
    }

    // ── Selection ───────────────────────────────────────────────────

    #[test]
    fn selecting_index_echoes_label() {
        let source = FakeSource::new(two_drinks());
        let mut flow = flow();
        tokio_test::block_on(flow.search(&source, "m"));

        for (i, expected) in ["Margarita", "Mojito"].into_iter().enumerate() {
            assert_eq!(flow.select(i), Some(expected));
            assert_eq!(flow.presenter().last_detail(), Some(expected));
            assert_eq!(flow.selected(), Some(i));
        }
        assert_eq!(flow.state(), FlowState::DetailShown);
    }

    #[test]
    fn selecting_out_of_range_is_ignored() {
        let source = FakeSource::new(two_drinks());
        let mut flow = flow();
        tokio_test::block_on(flow.search(&source, "m"));
        let before = flow.presenter().calls.len();

        assert_eq!(flow.select(5), None);
        assert_eq!(flow.presenter().calls.len(), before);
        assert_eq!(flow.state(), FlowState::Populated);
    }

    #[test]
    fn message_entries_are_selectable_too() {
        let source = FakeSource::new(Reply::Absent);
        let mut flow = flow();
        tokio_test::block_on(flow.search(&source, "q"));
        assert_eq!(flow.select(0), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn select_label_writes_verbatim() {
        let source = FakeSource::new(two_drinks());
        let mut flow = flow();
        tokio_test::block_on(flow.search(&source, "m"));

        flow.select_label("Mojito");
        assert_eq!(flow.selected(), Some(1));
        assert_eq!(flow.presenter().last_detail(), Some("Mojito"));

        flow.select_label("Not listed");
        assert_eq!(flow.selected(), None);
        assert_eq!(flow.presenter().last_detail(), Some("Not listed"));
    }

    // ── Re-search ───────────────────────────────────────────────────

    #[test]
    fn new_search_clears_list_and_detail_before_rendering() {
        let first = FakeSource::new(two_drinks());
        let second = FakeSource::new(Reply::Envelope(json!({
            "drinks": [{ "strDrink": "Negroni" }]
        })));
        let mut flow = flow();
        tokio_test::block_on(flow.search(&first, "m"));
        flow.select(0);
        let mark = flow.presenter().calls.len();

        tokio_test::block_on(flow.search(&second, "n"));

        let after = &flow.presenter().calls[mark..];
        assert_eq!(
            after,
            &[
                Render::Results(Vec::new()),
                Render::Detail(String::new()),
                Render::Detail(String::new()),
                Render::Results(labels(&["Negroni"])),
            ]
        );
        assert_eq!(flow.selected(), None);
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut flow = flow();
        let first = flow.submit("a").unwrap();
        let second = flow.submit("b").unwrap();
        assert_eq!(first.query().letter(), 'a');
        assert!(second.generation() > first.generation());

        let late: FetchOutcome = Ok(Some(SearchResponse::default()));
        assert!(!flow.complete(first, &late));
        assert_eq!(flow.state(), FlowState::Searching);
        assert!(flow.results().is_empty());

        let envelope: SearchResponse =
            serde_json::from_value(json!({ "drinks": [{ "strDrink": "Bramble" }] })).unwrap();
        assert!(flow.complete(second, &Ok(Some(envelope))));
        assert_eq!(flow.results(), labels(&["Bramble"]).as_slice());
        assert_eq!(flow.pending(), None);
    }

    #[test]
    fn invalid_submit_supersedes_pending_search() {
        let mut flow = flow();
        let ticket = flow.submit("a").unwrap();
        assert!(flow.submit("??").is_none());

        assert!(!flow.complete(ticket, &Ok(None)));
        assert_eq!(flow.results(), labels(&[INVALID_QUERY_MESSAGE]).as_slice());
    }

    #[test]
    fn ticket_completes_only_once() {
        let mut flow = flow();
        let ticket = flow.submit("a").unwrap();
        assert!(flow.complete(ticket, &Ok(None)));
        assert!(!flow.complete(ticket, &Ok(None)));
    }
}
