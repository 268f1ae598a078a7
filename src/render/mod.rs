//! Structured view-model -> markup projection of [`SessionState`].
//!
//! The renderer is a pure reader of session state: rebuilding with unchanged
//! state yields byte-identical markup. Two granularities exist: a full region
//! rebuild, and a targeted update of just the in-flight response node during
//! streaming so the rest of the tree (and the scroll anchor) survives each
//! chunk.


use crate::cell::state::{CellContent, Message, Role, SessionState};
use crate::format::{escape_html, format_content};

pub const PENDING_NODE_ID: &str = "assistant-response-placeholder";

/// One node of the display tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: &'static str,
        class: String,
        attrs: Vec<(&'static str, String)>,
        children: Vec<Node>,
    },
    /// Escaped on serialization.
    Text(String),
    /// Pre-formatted markup, written through as-is.
    Raw(String),
}

impl Node {
    fn el(tag: &'static str, class: &str, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            class: class.to_string(),
            attrs: Vec::new(),
            children,
        }
    }

    fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Node::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    fn write(&self, out: &mut String) {
        match self {
            Node::Element {
                tag,
                class,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                if !class.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(class);
                    out.push('"');
                }
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                for child in children {
                    child.write(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Raw(markup) => out.push_str(markup),
        }
    }
}

/// Mode-specific body of the display tree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyView {
    Chat {
        messages: Vec<Node>,
        pending: Option<Node>,
    },
    Coder {
        prompt: Node,
        source: Node,
    },
}

pub struct Renderer {
    title: &'static str,
    error_markup: Option<String>,
    picker: Node,
    body: BodyView,
    /// (transcript length, placeholder present) at the last chat rebuild,
    /// used to only auto-scroll on appends.
    chat_shape: (usize, bool),
    scrolls: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            title: "",
            error_markup: None,
            picker: Node::Raw(String::new()),
            body: BodyView::Chat {
                messages: Vec::new(),
                pending: None,
            },
            chat_shape: (0, false),
            scrolls: 0,
        }
    }

    /// Times the visible transcript/stream region has been scrolled to the
    /// bottom.
    pub fn scroll_events(&self) -> u64 {
        self.scrolls
    }

    /// Rebuild every region from the current state.
    pub fn render_full(&mut self, state: &SessionState) {
        self.error_markup = state.error.as_deref().map(format_content);
        self.picker = picker_node(state);
        match &state.content {
            CellContent::Chat { transcript } => {
                self.title = "Vibe - Chat with LLM";
                let pending = state.loading().then(|| pending_node(state));
                let shape = (transcript.len(), pending.is_some());
                self.body = BodyView::Chat {
                    messages: transcript.iter().map(message_node).collect(),
                    pending,
                };
                if shape != self.chat_shape {
                    self.chat_shape = shape;
                    self.scrolls += 1;
                }
            }
            CellContent::Coder { prompt, .. } => {
                self.title = "Vibe - Code Generator";
                self.body = BodyView::Coder {
                    prompt: prompt_node(prompt, state.loading()),
                    source: source_node(state),
                };
            }
        }
    }

    /// Update only the in-flight response node from the streaming buffer.
    /// Falls back to a full rebuild when no stream is active.
    pub fn render_stream(&mut self, state: &SessionState) {
        if !state.loading() {
            self.render_full(state);
            return;
        }
        match &mut self.body {
            BodyView::Chat { pending, .. } => {
                *pending = Some(pending_node(state));
                self.chat_shape.1 = true;
            }
            BodyView::Coder { source, .. } => {
                *source = source_node(state);
            }
        }
        self.scrolls += 1;
    }

    /// Serialize the current display tree.
    pub fn markup(&self) -> String {
        let error_region = match &self.error_markup {
            Some(markup) => Node::el("pre", "error-alert-box", vec![Node::Raw(markup.clone())]),
            None => Node::el("pre", "error-alert-box hidden", Vec::new()),
        };
        let body = match &self.body {
            BodyView::Chat { messages, pending } => {
                let mut children = messages.clone();
                match pending {
                    Some(node) => children.push(node.clone()),
                    None => {
                        if children.is_empty() {
                            children.push(Node::el(
                                "div",
                                "empty-chat",
                                vec![Node::Text("Select a model and start chatting".into())],
                            ));
                        }
                    }
                }
                Node::el(
                    "div",
                    "chat-container",
                    vec![
                        Node::el("div", "chat-messages", children).with_attr("id", "chat-messages")
                    ],
                )
            }
            BodyView::Coder { prompt, source } => Node::el(
                "div",
                "coder-body",
                vec![
                    Node::el("div", "prompt-container", vec![prompt.clone()]),
                    Node::el("div", "code-container", vec![source.clone()]),
                ],
            ),
        };
        let app = Node::el(
            "div",
            "app",
            vec![
                Node::el(
                    "div",
                    "header",
                    vec![Node::el("h3", "", vec![Node::Text(self.title.into())])],
                ),
                error_region,
                Node::el("div", "model-selector", vec![self.picker.clone()]),
                body,
            ],
        );
        let mut out = String::new();
        app.write(&mut out);
        out
    }
}

// ----------------------------------------------------------------------
// Region builders
// ----------------------------------------------------------------------

fn picker_node(state: &SessionState) -> Node {
    let class = if state.loading() {
        "model-select disabled"
    } else {
        "model-select"
    };
    let mut options = vec![Node::el(
        "option",
        if state.selection_listed() {
            "placeholder"
        } else {
            "placeholder selected"
        },
        vec![Node::Text("Select a model".into())],
    )
    .with_attr("value", "")];
    for model in &state.models {
        let selected = model.id == state.selected_model;
        options.push(
            Node::el(
                "option",
                if selected { "selected" } else { "" },
                vec![Node::Text(model.name.clone())],
            )
            .with_attr("value", model.id.clone()),
        );
    }
    Node::el("select", class, options).with_attr("id", "model-select")
}

fn message_node(message: &Message) -> Node {
    let class = match message.role {
        Role::User => "message user-message",
        Role::Assistant => "message assistant-message",
    };
    Node::el(
        "div",
        class,
        vec![Node::el(
            "div",
            "message-content",
            vec![Node::Raw(format_content(&message.content))],
        )],
    )
}

/// The single in-flight response node: a typing indicator until the first
/// chunk arrives, then the formatted accumulated buffer.
fn pending_node(state: &SessionState) -> Node {
    let content = match state.streaming_buffer() {
        Some(buffer) if !buffer.is_empty() => Node::Raw(format_content(buffer)),
        _ => Node::el(
            "div",
            "typing-indicator",
            vec![
                Node::el("span", "", Vec::new()),
                Node::el("span", "", Vec::new()),
                Node::el("span", "", Vec::new()),
            ],
        ),
    };
    Node::el(
        "div",
        "message assistant-message",
        vec![Node::el("div", "message-content", vec![content])],
    )
    .with_attr("id", PENDING_NODE_ID)
}

fn prompt_node(prompt: &str, loading: bool) -> Node {
    let class = if loading {
        "prompt-area disabled"
    } else {
        "prompt-area"
    };
    Node::el("textarea", class, vec![Node::Text(prompt.into())]).with_attr("id", "prompt-textarea")
}

/// Generated source is plain text, not formatted markup: while streaming it
/// mirrors the accumulated buffer, otherwise the host-confirmed source.
fn source_node(state: &SessionState) -> Node {
    let source = match &state.content {
        CellContent::Coder { source, .. } => source.as_str(),
        CellContent::Chat { .. } => "",
    };
    let text = state.streaming_buffer().unwrap_or(source);
    let class = if state.loading() {
        "code-area disabled"
    } else {
        "code-area"
    };
    Node::el("textarea", class, vec![Node::Text(text.into())]).with_attr("id", "code-textarea")
}
