//! Runtime Host
//!
//! Orchestrates the customer-facing experience: loads a flow/campaign pair,
//! resolves the authoritative page set, renders the current page through
//! the dispatch registry and applies navigation/auth events. One host owns
//! one session; nothing here is shared across sessions.

use crate::loader::{FlowBundle, FlowLoader, FlowRef, LoadError, TemplateLoader};
use veriflow_core::document::{FlowDocument, Page};
use veriflow_core::navigation::{NavTarget, NavigationController};
use veriflow_core::registry::SectionRegistry;
use veriflow_core::render::{
    CampaignContext, InputBag, NavigationHandle, RenderContext, RenderedNode,
};
use veriflow_core::resolve::{ResolvedPageSet, SourcePolicy, resolve_with_policy};
use veriflow_core::style::{StyleTokenSet, resolve_tokens};

/// Host lifecycle: `Loading → Ready`, with `Error` reachable from
/// `Loading`. `Ready` re-enters itself on every navigation event and
/// external prop change.
#[derive(Debug)]
pub enum HostState {
    Loading,
    Ready,
    Error(LoadError),
}

/// Everything owned by one ready session.
struct Session {
    resolved: ResolvedPageSet,
    nav: NavigationController,
    tokens: StyleTokenSet,
    campaign: CampaignContext,
    inputs: InputBag,
    navigator: NavigationHandle,
    is_authentic: Option<bool>,
}

/// Monotonic token identifying one load request. Only the most recently
/// issued request may apply its result; stale responses are discarded by
/// comparison, not cancelled.
pub type RequestToken = u64;

pub struct RuntimeHost<L, T> {
    loader: L,
    templates: T,
    registry: SectionRegistry,
    policy: SourcePolicy,
    trace: bool,
    request_seq: RequestToken,
    state: HostState,
    session: Option<Session>,
}

impl<L: FlowLoader, T: TemplateLoader> RuntimeHost<L, T> {
    pub fn new(loader: L, templates: T, registry: SectionRegistry) -> Self {
        RuntimeHost {
            loader,
            templates,
            registry,
            policy: SourcePolicy::default(),
            trace: false,
            request_seq: 0,
            state: HostState::Loading,
            session: None,
        }
    }

    /// Pin resolution to published content (live customer sessions).
    pub fn with_policy(mut self, policy: SourcePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Opt into verbose render-pass tracing (the `?trace` query flag).
    /// Diagnostic only; never affects resolution output.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn state(&self) -> &HostState {
        &self.state
    }

    /// Issue a new request token and enter `Loading`. Any in-flight request
    /// with an older token becomes stale.
    pub fn begin_load(&mut self) -> RequestToken {
        self.request_seq += 1;
        self.state = HostState::Loading;
        self.request_seq
    }

    /// Run the loader boundary for a previously issued token.
    pub async fn fetch(&self, flow_ref: &FlowRef) -> Result<FlowBundle, LoadError> {
        self.loader.load_flow(flow_ref).await
    }

    /// Apply a completed fetch. Returns `false` if the token is stale, in
    /// which case the result is discarded and the host state is untouched.
    pub async fn complete_load(
        &mut self,
        token: RequestToken,
        result: Result<FlowBundle, LoadError>,
    ) -> bool {
        if token != self.request_seq {
            tracing::debug!(token, latest = self.request_seq, "discarding stale load result");
            return false;
        }
        match result {
            Err(error) => {
                tracing::warn!(%error, "flow load failed");
                self.session = None;
                self.state = HostState::Error(error);
            }
            Ok(bundle) => {
                let resolved = resolve_with_policy(&bundle.record, self.policy);
                let flow_view = Self::flow_view(&bundle);
                let template = match flow_view.design_template_id.as_deref() {
                    Some(id) => match self.templates.load_template(id).await {
                        Ok(template) => template,
                        Err(error) => {
                            // Local recovery: default tokens, not an error state.
                            tracing::warn!(%error, template = id, "template fetch failed, using defaults");
                            None
                        }
                    },
                    None => None,
                };
                let tokens =
                    resolve_tokens(Some(&bundle.campaign), Some(&flow_view), template.as_ref());
                self.session = Some(Session {
                    resolved,
                    nav: NavigationController::new(),
                    tokens,
                    campaign: bundle.campaign,
                    inputs: InputBag::new(),
                    navigator: NavigationHandle::new(),
                    is_authentic: None,
                });
                self.state = HostState::Ready;
            }
        }
        true
    }

    /// Convenience: issue, fetch and apply in one call.
    pub async fn load(&mut self, flow_ref: &FlowRef) -> bool {
        let token = self.begin_load();
        let result = self.fetch(flow_ref).await;
        self.complete_load(token, result).await
    }

    /// The style/campaign surface of the record the style resolver reads.
    fn flow_view(bundle: &FlowBundle) -> FlowDocument {
        let mut view = FlowDocument::default();
        if let Some(config) = &bundle.record.flow_config {
            view.theme = config.theme.clone();
            view.global_header = config.global_header.clone();
            view.footer = config.footer.clone();
            view.design_template_id = config.design_template_id.clone();
        }
        view
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn resolved(&self) -> Option<&ResolvedPageSet> {
        self.session().map(|s| &s.resolved)
    }

    pub fn tokens(&self) -> Option<&StyleTokenSet> {
        self.session().map(|s| &s.tokens)
    }

    pub fn inputs(&self) -> Option<&InputBag> {
        self.session().map(|s| &s.inputs)
    }

    pub fn current_page_index(&self) -> usize {
        self.session()
            .map(|s| s.nav.current_index(&s.resolved.pages))
            .unwrap_or(0)
    }

    pub fn current_page(&self) -> Option<&Page> {
        let session = self.session()?;
        session.resolved.pages.get(session.nav.current_index(&session.resolved.pages))
    }

    /// Record the external authentication outcome and re-enter `Ready`.
    pub fn set_authenticity(&mut self, is_authentic: Option<bool>) {
        if let Some(session) = self.session.as_mut() {
            session.is_authentic = is_authentic;
        }
    }

    /// Externally driven page index for embedded previews. While set, the
    /// navigation controller is read-only.
    pub fn set_external_page_index(&mut self, index: Option<usize>) {
        if let Some(session) = self.session.as_mut() {
            session.nav.set_external_index(index);
        }
    }

    /// Apply one navigation request. Returns `true` if the index changed;
    /// unknown targets and out-of-bounds moves are silent no-ops.
    pub fn navigate(&mut self, target: &NavTarget) -> bool {
        match self.session.as_mut() {
            Some(session) => session.nav.navigate(target, &session.resolved.pages),
            None => false,
        }
    }

    pub fn navigate_raw(&mut self, raw: &str) -> bool {
        self.navigate(&NavTarget::parse(raw))
    }

    /// Drain intents queued by renderers through the context handle and
    /// apply them in order. Returns how many changed the index.
    pub fn drain_navigation(&mut self) -> usize {
        let Some(session) = self.session.as_mut() else {
            return 0;
        };
        let targets = session.navigator.drain();
        targets
            .iter()
            .filter(|t| session.nav.navigate(t, &session.resolved.pages))
            .count()
    }

    fn render_context(&self, session: &Session) -> RenderContext {
        let mut ctx = RenderContext::new(session.tokens.clone()).with_campaign(&session.campaign);
        ctx.inputs = session.inputs.clone();
        ctx.navigator = session.navigator.clone();
        ctx.is_authentic = session.is_authentic;
        ctx.trace = self.trace;
        ctx
    }

    /// One synchronous render pass over the current page.
    ///
    /// Resolution emptiness is not an error: it renders a labeled
    /// no-content state telling the operator whether to republish or to
    /// author content. Load failures render a full-screen error card.
    pub fn render_current_page(&self) -> Vec<RenderedNode> {
        match &self.state {
            HostState::Loading => Vec::new(),
            HostState::Error(error) => vec![RenderedNode::Error {
                id: "host".to_string(),
                tag: "load_failure".to_string(),
                message: error.to_string(),
            }],
            HostState::Ready => {
                let Some(session) = self.session() else {
                    return Vec::new();
                };
                if session.resolved.is_empty() {
                    let label = session
                        .resolved
                        .empty_label()
                        .unwrap_or("No content available");
                    return vec![RenderedNode::EmptyState {
                        label: label.to_string(),
                    }];
                }
                let index = session.nav.current_index(&session.resolved.pages);
                let page = &session.resolved.pages[index];
                if self.trace {
                    tracing::debug!(
                        source = ?session.resolved.source,
                        page_count = session.resolved.pages.len(),
                        current_page = %page.id,
                        "render pass"
                    );
                }
                let ctx = self.render_context(session);
                self.registry.render_page(page, &ctx)
            }
        }
    }
}
