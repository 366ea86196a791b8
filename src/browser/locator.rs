//! Element locators for the verification checks
//!
//! A locator describes how to find an element on the page under test. It is
//! compiled to a self-contained JavaScript expression and evaluated over CDP,
//! so the checks work against whatever the app has rendered, framework
//! internals included.

/// Descriptor for an element the verification cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A `<button>` whose text contains the given string
    Button { text: String },
    /// Any element whose own text contains the given string
    Text { text: String },
}

impl Locator {
    /// Locator for a button containing the given text
    pub fn button_with_text(text: impl Into<String>) -> Self {
        Self::Button { text: text.into() }
    }

    /// Locator for visible text content
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Human-readable description for error messages
    pub fn description(&self) -> String {
        match self {
            Self::Button { text } => format!("button {:?}", text),
            Self::Text { text } => format!("text {:?}", text),
        }
    }

    /// JS expression: does the element exist in an enabled state?
    pub fn enabled_expr(&self) -> String {
        match self {
            Self::Button { text } => format!(
                r#"(() => {{
                    const btn = Array.from(document.querySelectorAll('button'))
                        .find(el => (el.textContent || '').includes({needle}));
                    return !!btn && !btn.disabled;
                }})()"#,
                needle = js_string(text),
            ),
            Self::Text { text } => format!(
                r#"(() => {{
                    const el = Array.from(document.querySelectorAll('body, body *'))
                        .find(el => el.childElementCount === 0
                            && (el.textContent || '').includes({needle}));
                    return !!el && !el.disabled;
                }})()"#,
                needle = js_string(text),
            ),
        }
    }

    /// JS expression: is the element currently visible?
    ///
    /// Visibility means a non-empty box that is not `display:none` or
    /// `visibility:hidden`, matching what a user would see on screen.
    pub fn visible_expr(&self) -> String {
        let (selector, needle) = match self {
            Self::Button { text } => ("button", js_string(text)),
            Self::Text { text } => ("body, body *", js_string(text)),
        };
        format!(
            r#"(() => {{
                const matches = Array.from(document.querySelectorAll('{selector}'))
                    .filter(el => el.childElementCount === 0
                        && (el.textContent || '').includes({needle}));
                return matches.some(el => {{
                    const style = window.getComputedStyle(el);
                    if (style.display === 'none' || style.visibility === 'hidden') return false;
                    const rect = el.getBoundingClientRect();
                    return rect.width > 0 && rect.height > 0;
                }});
            }})()"#,
        )
    }
}

/// Encode text as a JS string literal so quotes and backslashes in locator
/// text cannot break out of the generated script.
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}
