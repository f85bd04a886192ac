use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Token replaced by the capture delay inside a base template. Only the first
/// occurrence is substituted.
pub const DELAY_PLACEHOLDER: &str = "{delay}";

pub const FORMATS_HEADER: &str = "\n\n---DESIRED OUTPUT FORMATS---";
pub const FORMATS_TRAILER: &str = "\n--------------------------\nPlease provide all requested formats in your single response, clearly labeled by their headers.";

/// Base template selector. Closed set; unknown names degrade to `Default`
/// instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKey {
    Default,
    ShortAlert,
    FormalReport,
    FriendlyMessage,
    CompleteReportComparison,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 5] = [
        TemplateKey::Default,
        TemplateKey::ShortAlert,
        TemplateKey::FormalReport,
        TemplateKey::FriendlyMessage,
        TemplateKey::CompleteReportComparison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::Default => "default",
            TemplateKey::ShortAlert => "short_alert",
            TemplateKey::FormalReport => "formal_report",
            TemplateKey::FriendlyMessage => "friendly_message",
            TemplateKey::CompleteReportComparison => "complete_report_comparison",
        }
    }

    /// Resolve a raw template name. Unknown names fall back to `Default`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "short_alert" => TemplateKey::ShortAlert,
            "formal_report" => TemplateKey::FormalReport,
            "friendly_message" => TemplateKey::FriendlyMessage,
            "complete_report_comparison" => TemplateKey::CompleteReportComparison,
            _ => TemplateKey::Default,
        }
    }

    pub fn base_template(&self) -> &'static str {
        match self {
            TemplateKey::Default => {
                "Analyze the two images captured with a {delay}-second delay. Describe any noticeable changes in objects, lighting, device states (ON/OFF), or presence of people/animals."
            }
            TemplateKey::ShortAlert => {
                "Quickly analyze the two images ({delay}-second delay). Identify any critical or immediate changes that require attention. Focus on security, safety, or unexpected operational shifts."
            }
            TemplateKey::FormalReport => {
                "Conduct a detailed comparative analysis of the two images captured with a {delay}-second delay. Document all observed discrepancies concerning object positions, environmental lighting, operational status of devices, and instances of human or animal presence."
            }
            TemplateKey::FriendlyMessage => {
                "Hey there! I took two pictures {delay} seconds apart. Can you spot anything new or different? Maybe a light turned on, something moved, or a new visitor appeared? Keep it chill!"
            }
            TemplateKey::CompleteReportComparison => {
                "Perform a comprehensive side-by-side comparison of the two provided images, taken {delay} seconds apart. Detail all detected changes including but not limited to: shifts in object positions, changes in luminosity or light sources (on/off), presence or absence of individuals/animals, and any other notable environmental alterations. Provide a structured report outlining 'Before' and 'After' states for key elements, followed by a summary of 'Differences Detected'."
            }
        }
    }
}

impl Default for TemplateKey {
    fn default() -> Self {
        TemplateKey::Default
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response-format instruction selector. Independent value space from
/// `TemplateKey` even where the names overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    ShortAlert,
    FormalReport,
    FriendlyMessage,
}

impl OutputFormat {
    /// Declaration order doubles as the rendering order of selected
    /// instruction blocks.
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::ShortAlert,
        OutputFormat::FormalReport,
        OutputFormat::FriendlyMessage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::ShortAlert => "short_alert",
            OutputFormat::FormalReport => "formal_report",
            OutputFormat::FriendlyMessage => "friendly_message",
        }
    }

    /// Resolve a raw format name. Unknown names yield `None` and are dropped
    /// by the composer.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "short_alert" => Some(OutputFormat::ShortAlert),
            "formal_report" => Some(OutputFormat::FormalReport),
            "friendly_message" => Some(OutputFormat::FriendlyMessage),
            _ => None,
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            OutputFormat::ShortAlert => {
                "\n\n---SHORT ALERT---\nPlease provide a concise, urgent alert (max 2 sentences) summarizing the most critical change, if any. Example: \"Warning: Printer failed to restart after outage. Manual check required.\""
            }
            OutputFormat::FormalReport => {
                "\n\n---FORMAL REPORT---\nGenerate a formal, detailed report. Include sections for: \"Initial State (Image 1)\", \"Current State (Image 2)\", \"Observed Changes\", and \"Recommendations\"."
            }
            OutputFormat::FriendlyMessage => {
                "\n\n---FRIENDLY MESSAGE---\nGive me a casual, friendly message describing the changes, as if talking to a friend."
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the analysis prompt for a template, capture delay, and set of
/// selected output formats.
///
/// Pure and total: identical inputs always produce the same string, and no
/// input combination fails. Selected formats render in `OutputFormat::ALL`
/// order regardless of how the set was built.
pub fn compose(template: TemplateKey, delay_seconds: u32, formats: &HashSet<OutputFormat>) -> String {
    let mut prompt = template
        .base_template()
        .replacen(DELAY_PLACEHOLDER, &delay_seconds.to_string(), 1);

    if formats.is_empty() {
        return prompt;
    }

    prompt.push_str(FORMATS_HEADER);
    for format in OutputFormat::ALL {
        if formats.contains(&format) {
            prompt.push_str(format.instruction());
        }
    }
    prompt.push_str(FORMATS_TRAILER);
    prompt
}

/// String-keyed entry point for callers holding raw names. Unknown template
/// names fall back to the default template; unknown format names are dropped.
pub fn compose_named(template: &str, delay_seconds: u32, formats: &[&str]) -> String {
    let key = TemplateKey::from_name(template);
    let selected: HashSet<OutputFormat> = formats
        .iter()
        .filter_map(|name| OutputFormat::from_name(name))
        .collect();
    compose(key, delay_seconds, &selected)
}

/// The caller's current template and format selection, kept as one explicit
/// state object rather than loose variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptSelection {
    pub template: TemplateKey,
    pub formats: HashSet<OutputFormat>,
}

impl PromptSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: TemplateKey) -> Self {
        self.template = template;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.formats.insert(format);
        self
    }

    pub fn select_format(&mut self, format: OutputFormat) {
        self.formats.insert(format);
    }

    pub fn deselect_format(&mut self, format: OutputFormat) {
        self.formats.remove(&format);
    }

    pub fn toggle_format(&mut self, format: OutputFormat) {
        if !self.formats.remove(&format) {
            self.formats.insert(format);
        }
    }

    pub fn compose(&self, delay_seconds: u32) -> String {
        compose(self.template, delay_seconds, &self.formats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(formats: &[OutputFormat]) -> HashSet<OutputFormat> {
        formats.iter().copied().collect()
    }

    #[test]
    fn test_default_template_with_empty_set() {
        assert_eq!(
            compose(TemplateKey::Default, 5, &HashSet::new()),
            "Analyze the two images captured with a 5-second delay. Describe any noticeable changes in objects, lighting, device states (ON/OFF), or presence of people/animals."
        );
    }

    #[test]
    fn test_empty_set_substitutes_without_appending() {
        for key in TemplateKey::ALL {
            let result = compose(key, 42, &HashSet::new());
            assert_eq!(result, key.base_template().replacen("{delay}", "42", 1));
            assert!(!result.contains("{delay}"));
            assert!(!result.contains("---DESIRED OUTPUT FORMATS---"));
        }
    }

    #[test]
    fn test_unknown_template_name_falls_back_to_default() {
        assert_eq!(
            compose_named("nonexistent_key", 5, &[]),
            compose_named("default", 5, &[])
        );
    }

    #[test]
    fn test_unknown_format_name_is_dropped() {
        for key in TemplateKey::ALL {
            assert_eq!(
                compose_named(key.as_str(), 7, &["unknown_tag"]),
                compose_named(key.as_str(), 7, &[])
            );
        }
    }

    #[test]
    fn test_compose_is_idempotent() {
        let formats = set(&[OutputFormat::ShortAlert, OutputFormat::FriendlyMessage]);
        let first = compose(TemplateKey::FormalReport, 12, &formats);
        let second = compose(TemplateKey::FormalReport, 12, &formats);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_format_appends_header_block_and_trailer() {
        let result = compose(TemplateKey::ShortAlert, 10, &set(&[OutputFormat::ShortAlert]));
        let expected = format!(
            "{}{}{}{}",
            TemplateKey::ShortAlert.base_template().replacen("{delay}", "10", 1),
            FORMATS_HEADER,
            OutputFormat::ShortAlert.instruction(),
            FORMATS_TRAILER
        );
        assert_eq!(result, expected);
    }

    #[test]
    fn test_format_blocks_render_in_declaration_order() {
        // Selection/insertion order must never leak into the output.
        let mut reversed = HashSet::new();
        reversed.insert(OutputFormat::FriendlyMessage);
        reversed.insert(OutputFormat::FormalReport);

        let result = compose(TemplateKey::FriendlyMessage, 3, &reversed);
        let expected = format!(
            "{}{}{}{}{}",
            TemplateKey::FriendlyMessage.base_template().replacen("{delay}", "3", 1),
            FORMATS_HEADER,
            OutputFormat::FormalReport.instruction(),
            OutputFormat::FriendlyMessage.instruction(),
            FORMATS_TRAILER
        );
        assert_eq!(result, expected);

        let formal_at = result.find("---FORMAL REPORT---").unwrap();
        let friendly_at = result.find("---FRIENDLY MESSAGE---").unwrap();
        assert!(formal_at < friendly_at);
    }

    #[test]
    fn test_all_formats_selected() {
        let result = compose(TemplateKey::Default, 5, &set(&OutputFormat::ALL));
        assert!(result.contains("---SHORT ALERT---"));
        assert!(result.contains("---FORMAL REPORT---"));
        assert!(result.contains("---FRIENDLY MESSAGE---"));
        assert!(result.ends_with(FORMATS_TRAILER));
    }

    #[test]
    fn test_only_first_placeholder_is_substituted() {
        // None of the fixed templates repeat the placeholder; the substitution
        // contract still only touches the first occurrence.
        let doubled = "First {delay}, second {delay}.".replacen(DELAY_PLACEHOLDER, "9", 1);
        assert_eq!(doubled, "First 9, second {delay}.");
    }

    #[test]
    fn test_zero_delay_is_accepted() {
        let result = compose(TemplateKey::Default, 0, &HashSet::new());
        assert!(result.contains("a 0-second delay"));
    }

    #[test]
    fn test_output_is_never_empty() {
        assert!(!compose_named("", 0, &[]).is_empty());
        assert!(!compose_named("bogus", 60, &["also_bogus"]).is_empty());
    }

    #[test]
    fn test_template_name_round_trip() {
        for key in TemplateKey::ALL {
            assert_eq!(TemplateKey::from_name(key.as_str()), key);
        }
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::from_name(format.as_str()), Some(format));
        }
        assert_eq!(OutputFormat::from_name("complete_report_comparison"), None);
    }

    #[test]
    fn test_selection_toggle_and_compose() {
        let mut selection = PromptSelection::new().with_template(TemplateKey::ShortAlert);
        selection.toggle_format(OutputFormat::ShortAlert);
        assert!(selection.formats.contains(&OutputFormat::ShortAlert));

        let composed = selection.compose(10);
        assert_eq!(
            composed,
            compose(TemplateKey::ShortAlert, 10, &set(&[OutputFormat::ShortAlert]))
        );

        selection.toggle_format(OutputFormat::ShortAlert);
        assert!(selection.formats.is_empty());
        assert_eq!(
            selection.compose(10),
            TemplateKey::ShortAlert.base_template().replacen("{delay}", "10", 1)
        );
    }
}
