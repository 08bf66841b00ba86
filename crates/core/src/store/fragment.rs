use regex::Regex;

/// The `<param name="...">...</param>` fragment for one parameter, taken from
/// a member's raw documentation. Matching stops at the first line break.
pub fn parameter_fragment(documentation: &str, parameter: &str) -> Option<String> {
    let pattern = format!(
        "{}.*?{}",
        regex::escape(&format!("<param name=\"{}\">", parameter)),
        regex::escape("</param>")
    );
    let re = Regex::new(&pattern).ok()?;
    re.find(documentation).map(|m| m.as_str().to_string())
}
