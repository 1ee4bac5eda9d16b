//! Data models and type definitions for cleanshot-mcp
//!
//! This module defines the core types used throughout the application:
//! - The closed set of CleanShot operations and their static field tables
//! - Typed argument values produced by schema validation
//! - The dispatch receipt returned to MCP clients as structured content

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// URL scheme registered by CleanShot X
pub const SCHEME: &str = "cleanshot";

/// Post-capture actions accepted by the capture tools
pub const CAPTURE_ACTIONS: &[&str] = &["copy", "save", "annotate", "upload", "pin"];

/// Settings tabs accepted by `open-settings`
pub const SETTINGS_TABS: &[&str] = &[
    "general",
    "wallpaper",
    "shortcuts",
    "quickaccess",
    "recording",
    "screenshots",
    "annotate",
    "cloud",
    "advanced",
    "about",
];

/// Value type accepted by a single tool field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// Free-form JSON string
    String,
    /// JSON string restricted to a closed, case-sensitive set of literals
    Enum(&'static [&'static str]),
}

impl FieldKind {
    /// JSON Schema `type` keyword for this kind
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::String | FieldKind::Enum(_) => "string",
        }
    }
}

/// Declarative description of one argument accepted by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Argument name, used verbatim as the query parameter key
    pub name:        &'static str,
    /// Accepted value type
    pub kind:        FieldKind,
    /// Whether the argument must be supplied
    pub required:    bool,
    /// Human-readable description advertised in the tool list
    pub description: &'static str,
}

impl FieldSpec {
    const fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }

    const fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }
}

const X: FieldSpec =
    FieldSpec::optional("x", FieldKind::Number, "X coordinate (0,0 is lower left)");
const Y: FieldSpec =
    FieldSpec::optional("y", FieldKind::Number, "Y coordinate (0,0 is lower left)");
const WIDTH: FieldSpec =
    FieldSpec::optional("width", FieldKind::Number, "Width of the capture area");
const HEIGHT: FieldSpec =
    FieldSpec::optional("height", FieldKind::Number, "Height of the capture area");
const RECORD_WIDTH: FieldSpec =
    FieldSpec::optional("width", FieldKind::Number, "Width of the recording area");
const RECORD_HEIGHT: FieldSpec =
    FieldSpec::optional("height", FieldKind::Number, "Height of the recording area");
const DISPLAY: FieldSpec =
    FieldSpec::optional("display", FieldKind::Number, "Display number (1 is main display)");
const ACTION: FieldSpec = FieldSpec::optional(
    "action",
    FieldKind::Enum(CAPTURE_ACTIONS),
    "Action to perform after capture",
);

const AREA_FIELDS: &[FieldSpec] = &[X, Y, WIDTH, HEIGHT, DISPLAY];
const CAPTURE_AREA_FIELDS: &[FieldSpec] = &[X, Y, WIDTH, HEIGHT, DISPLAY, ACTION];
const RECORD_FIELDS: &[FieldSpec] = &[X, Y, RECORD_WIDTH, RECORD_HEIGHT, DISPLAY];
const ACTION_FIELDS: &[FieldSpec] = &[ACTION];
const SCROLLING_FIELDS: &[FieldSpec] = &[
    X,
    Y,
    WIDTH,
    HEIGHT,
    DISPLAY,
    FieldSpec::optional("start", FieldKind::Boolean, "Automatically start capture"),
    FieldSpec::optional("autoscroll", FieldKind::Boolean, "Enable auto-scroll mode"),
];
const CAPTURE_TEXT_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional(
        "filepath",
        FieldKind::String,
        "Path to the image file to extract text from",
    ),
    X,
    Y,
    WIDTH,
    HEIGHT,
    DISPLAY,
    FieldSpec::optional(
        "linebreaks",
        FieldKind::Boolean,
        "Keep (true) or remove (false) line breaks from copied text",
    ),
];
const PIN_FIELDS: &[FieldSpec] = &[FieldSpec::optional(
    "filepath",
    FieldKind::String,
    "Path to the PNG/JPEG file to pin",
)];
const ANNOTATE_FIELDS: &[FieldSpec] = &[FieldSpec::optional(
    "filepath",
    FieldKind::String,
    "Path to the PNG/JPEG file to annotate",
)];
const QUICK_ACCESS_FIELDS: &[FieldSpec] = &[FieldSpec::required(
    "filepath",
    FieldKind::String,
    "Path to the image or video file (PNG/JPEG/MP4)",
)];
const SETTINGS_FIELDS: &[FieldSpec] = &[FieldSpec::optional(
    "tab",
    FieldKind::Enum(SETTINGS_TABS),
    "Specific settings tab to open",
)];

/// One fixed action of the CleanShot URL scheme
///
/// Each operation corresponds 1:1 to an MCP tool and to one path segment of
/// `cleanshot://`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AllInOne,
    CaptureArea,
    CapturePreviousArea,
    CaptureFullscreen,
    CaptureWindow,
    SelfTimer,
    ScrollingCapture,
    Pin,
    RecordScreen,
    CaptureText,
    OpenAnnotate,
    OpenFromClipboard,
    ToggleDesktopIcons,
    HideDesktopIcons,
    ShowDesktopIcons,
    AddQuickAccessOverlay,
    OpenHistory,
    RestoreRecentlyClosed,
    OpenSettings,
}

impl Operation {
    /// Every supported operation, in tool-list order
    pub const ALL: [Operation; 19] = [
        Operation::AllInOne,
        Operation::CaptureArea,
        Operation::CapturePreviousArea,
        Operation::CaptureFullscreen,
        Operation::CaptureWindow,
        Operation::SelfTimer,
        Operation::ScrollingCapture,
        Operation::Pin,
        Operation::RecordScreen,
        Operation::CaptureText,
        Operation::OpenAnnotate,
        Operation::OpenFromClipboard,
        Operation::ToggleDesktopIcons,
        Operation::HideDesktopIcons,
        Operation::ShowDesktopIcons,
        Operation::AddQuickAccessOverlay,
        Operation::OpenHistory,
        Operation::RestoreRecentlyClosed,
        Operation::OpenSettings,
    ];

    /// Path segment used after `cleanshot://`
    pub fn path(&self) -> &'static str {
        match self {
            Operation::AllInOne => "all-in-one",
            Operation::CaptureArea => "capture-area",
            Operation::CapturePreviousArea => "capture-previous-area",
            Operation::CaptureFullscreen => "capture-fullscreen",
            Operation::CaptureWindow => "capture-window",
            Operation::SelfTimer => "self-timer",
            Operation::ScrollingCapture => "scrolling-capture",
            Operation::Pin => "pin",
            Operation::RecordScreen => "record-screen",
            Operation::CaptureText => "capture-text",
            Operation::OpenAnnotate => "open-annotate",
            Operation::OpenFromClipboard => "open-from-clipboard",
            Operation::ToggleDesktopIcons => "toggle-desktop-icons",
            Operation::HideDesktopIcons => "hide-desktop-icons",
            Operation::ShowDesktopIcons => "show-desktop-icons",
            Operation::AddQuickAccessOverlay => "add-quick-access-overlay",
            Operation::OpenHistory => "open-history",
            Operation::RestoreRecentlyClosed => "restore-recently-closed",
            Operation::OpenSettings => "open-settings",
        }
    }

    /// MCP tool name advertised for this operation
    pub fn tool_name(&self) -> &'static str {
        match self {
            Operation::AllInOne => "cleanshot_all_in_one",
            Operation::CaptureArea => "cleanshot_capture_area",
            Operation::CapturePreviousArea => "cleanshot_capture_previous_area",
            Operation::CaptureFullscreen => "cleanshot_capture_fullscreen",
            Operation::CaptureWindow => "cleanshot_capture_window",
            Operation::SelfTimer => "cleanshot_self_timer",
            Operation::ScrollingCapture => "cleanshot_scrolling_capture",
            Operation::Pin => "cleanshot_pin",
            Operation::RecordScreen => "cleanshot_record_screen",
            Operation::CaptureText => "cleanshot_capture_text",
            Operation::OpenAnnotate => "cleanshot_open_annotate",
            Operation::OpenFromClipboard => "cleanshot_open_from_clipboard",
            Operation::ToggleDesktopIcons => "cleanshot_toggle_desktop_icons",
            Operation::HideDesktopIcons => "cleanshot_hide_desktop_icons",
            Operation::ShowDesktopIcons => "cleanshot_show_desktop_icons",
            Operation::AddQuickAccessOverlay => "cleanshot_add_quick_access_overlay",
            Operation::OpenHistory => "cleanshot_open_history",
            Operation::RestoreRecentlyClosed => "cleanshot_restore_recently_closed",
            Operation::OpenSettings => "cleanshot_open_settings",
        }
    }

    /// Looks up an operation by its MCP tool name
    pub fn from_tool_name(name: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.tool_name() == name)
    }

    /// Tool description advertised in `tools/list`
    pub fn description(&self) -> &'static str {
        match self {
            Operation::AllInOne => {
                "Launch CleanShot's All-In-One mode with optional position and size parameters"
            }
            Operation::CaptureArea => "Open CleanShot's Capture Area mode with optional parameters",
            Operation::CapturePreviousArea => "Repeat the last taken screenshot",
            Operation::CaptureFullscreen => "Take a fullscreen screenshot",
            Operation::CaptureWindow => "Open CleanShot's Capture Window mode",
            Operation::SelfTimer => "Open CleanShot's Capture Area mode with self-timer",
            Operation::ScrollingCapture => "Open CleanShot's Scrolling Capture mode",
            Operation::Pin => "Open a file as a pinned screenshot",
            Operation::RecordScreen => "Open CleanShot's Record Screen mode",
            Operation::CaptureText => {
                "Open CleanShot's Text Recognition (OCR) tool or extract text from a file"
            }
            Operation::OpenAnnotate => "Open a file in CleanShot's Annotate tool",
            Operation::OpenFromClipboard => {
                "Open the image from clipboard in CleanShot's Annotate tool"
            }
            Operation::ToggleDesktopIcons => "Toggle desktop icons visibility",
            Operation::HideDesktopIcons => "Hide desktop icons",
            Operation::ShowDesktopIcons => "Show desktop icons",
            Operation::AddQuickAccessOverlay => "Add a file to CleanShot's Quick Access Overlay",
            Operation::OpenHistory => "Open CleanShot's capture history",
            Operation::RestoreRecentlyClosed => "Restore the most recently closed file from history",
            Operation::OpenSettings => "Open CleanShot settings with optional tab",
        }
    }

    /// Prefix of the success message; the dispatched URL follows it
    pub fn summary(&self) -> &'static str {
        match self {
            Operation::AllInOne => "Opened CleanShot All-In-One mode",
            Operation::CaptureArea => "Opened CleanShot Capture Area",
            Operation::CapturePreviousArea => "Repeated last screenshot",
            Operation::CaptureFullscreen => "Took fullscreen screenshot",
            Operation::CaptureWindow => "Opened CleanShot Capture Window",
            Operation::SelfTimer => "Opened CleanShot Self-Timer",
            Operation::ScrollingCapture => "Opened CleanShot Scrolling Capture",
            Operation::Pin => "Pinned screenshot",
            Operation::RecordScreen => "Opened CleanShot Record Screen",
            Operation::CaptureText => "Opened CleanShot Text Recognition",
            Operation::OpenAnnotate => "Opened CleanShot Annotate",
            Operation::OpenFromClipboard => "Opened CleanShot Annotate from clipboard",
            Operation::ToggleDesktopIcons => "Toggled desktop icons",
            Operation::HideDesktopIcons => "Hidden desktop icons",
            Operation::ShowDesktopIcons => "Shown desktop icons",
            Operation::AddQuickAccessOverlay => "Added Quick Access Overlay",
            Operation::OpenHistory => "Opened CleanShot history",
            Operation::RestoreRecentlyClosed => "Restored recently closed file",
            Operation::OpenSettings => "Opened CleanShot settings",
        }
    }

    /// Static field table for this operation
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Operation::AllInOne => AREA_FIELDS,
            Operation::CaptureArea => CAPTURE_AREA_FIELDS,
            Operation::CapturePreviousArea
            | Operation::CaptureFullscreen
            | Operation::CaptureWindow
            | Operation::SelfTimer => ACTION_FIELDS,
            Operation::ScrollingCapture => SCROLLING_FIELDS,
            Operation::Pin => PIN_FIELDS,
            Operation::RecordScreen => RECORD_FIELDS,
            Operation::CaptureText => CAPTURE_TEXT_FIELDS,
            Operation::OpenAnnotate => ANNOTATE_FIELDS,
            Operation::AddQuickAccessOverlay => QUICK_ACCESS_FIELDS,
            Operation::OpenSettings => SETTINGS_FIELDS,
            Operation::OpenFromClipboard
            | Operation::ToggleDesktopIcons
            | Operation::HideDesktopIcons
            | Operation::ShowDesktopIcons
            | Operation::OpenHistory
            | Operation::RestoreRecentlyClosed => &[],
        }
    }

    /// Finds the declared field with the given name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|field| field.name == name)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A validated argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Number(serde_json::Number),
    Boolean(bool),
    /// Free-form string or a validated enum literal
    String(String),
}

impl ArgValue {
    /// Canonical text form used in the query string
    ///
    /// Integral numbers render without a fractional part (`10`, not `10.0`).
    pub fn to_query_value(&self) -> String {
        match self {
            ArgValue::Number(n) => canonical_number(n),
            ArgValue::Boolean(b) => b.to_string(),
            ArgValue::String(s) => s.clone(),
        }
    }
}

// Largest magnitude where every integer is exactly representable in an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn canonical_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => format!("{}", f as i64),
        Some(f) if f != 0.0 && (f.abs() >= 1e21 || f.abs() < 1e-6) => exponent_form(f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

// Same shape as JavaScript's Number#toString: `1e+300`, `2.5e-7`.
fn exponent_form(f: f64) -> String {
    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Validated arguments for one operation invocation
///
/// Holds only fields the operation declares, in the order the caller supplied
/// them. Absent and `null` values never appear here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgumentSet {
    entries: Vec<(&'static str, ArgValue)>,
}

impl ArgumentSet {
    /// Creates an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &'static str, value: ArgValue) {
        self.entries.push((name, value));
    }

    /// Returns the value supplied for `name`, if any
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in supplied order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ArgValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Number of supplied arguments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the caller supplied no arguments
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Structured result of a successful tool call
///
/// Returned to MCP clients as `structuredContent`. CleanShot gives no
/// feedback, so this only records that the OS accepted the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DispatchReceipt {
    /// MCP tool that was invoked
    pub tool:      String,
    /// CleanShot operation path
    pub operation: String,
    /// Exact URL handed to the system opener
    pub url:       String,
    /// Human-readable summary, identical to the text content
    pub message:   String,
}

impl DispatchReceipt {
    /// Records a dispatched `url`, with `message` built from the operation summary
    pub fn new(operation: Operation, url: String) -> Self {
        Self {
            tool: operation.tool_name().to_string(),
            operation: operation.path().to_string(),
            message: format!("{}: {}", operation.summary(), url),
            url,
        }
    }
}
