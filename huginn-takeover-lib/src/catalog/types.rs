use std::ops::Range;

use regex::Regex;

/// A takeover fingerprint for one third-party platform
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint {
    /// Platform name, e.g. "GitHub Pages"
    pub service: String,
    /// Text expected in the platform's "unclaimed" response body
    pub signature: Signature,
    /// The signature only proves a takeover when the dangling record does not resolve
    pub requires_nxdomain: bool,
    /// Lowercase substrings identifying the platform in a CNAME target
    pub cname_patterns: Vec<String>,
    /// Status code that must accompany a body signature match
    pub http_status: Option<u16>,
    pub documentation_url: Option<String>,
    pub discussion_url: Option<String>,
}

impl Fingerprint {
    pub fn new(service: impl Into<String>, signature: Signature) -> Self {
        Self {
            service: service.into(),
            signature,
            requires_nxdomain: false,
            cname_patterns: Vec::new(),
            http_status: None,
            documentation_url: None,
            discussion_url: None,
        }
    }

    pub fn with_nxdomain(mut self, requires_nxdomain: bool) -> Self {
        self.requires_nxdomain = requires_nxdomain;
        self
    }

    pub fn with_cnames<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cname_patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }

    pub fn with_http_status(mut self, status: Option<u16>) -> Self {
        self.http_status = status;
        self
    }

    pub fn with_links(mut self, documentation: Option<String>, discussion: Option<String>) -> Self {
        self.documentation_url = documentation.filter(|s| !s.trim().is_empty());
        self.discussion_url = discussion.filter(|s| !s.trim().is_empty());
        self
    }

    /// Byte range of the first CNAME pattern found in `cname`, compared case-insensitively
    pub fn find_cname(&self, cname: &str) -> Option<Range<usize>> {
        let lowered = cname.to_ascii_lowercase();
        self.cname_patterns.iter().find_map(|pattern| {
            lowered
                .find(pattern.as_str())
                .map(|start| start..start + pattern.len())
        })
    }
}

/// Signature text: a plain substring, or a regular expression written as `/pattern/`
#[derive(Debug, Clone)]
pub enum Signature {
    Substring(String),
    Pattern(Regex),
}

impl Signature {
    pub fn parse(raw: &str) -> Result<Self, regex::Error> {
        if raw.len() > 2 && raw.starts_with('/') && raw.ends_with('/') {
            let inner = &raw[1..raw.len() - 1];
            return Regex::new(inner).map(Signature::Pattern);
        }
        Ok(Signature::Substring(raw.to_string()))
    }

    pub fn substring(text: impl Into<String>) -> Self {
        Signature::Substring(text.into())
    }

    /// Byte range of the first occurrence in `haystack`
    pub fn find(&self, haystack: &str) -> Option<Range<usize>> {
        match self {
            Signature::Substring(needle) if needle.is_empty() => None,
            Signature::Substring(needle) => haystack
                .find(needle.as_str())
                .map(|start| start..start + needle.len()),
            Signature::Pattern(re) => re.find(haystack).map(|m| m.range()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Signature::Substring(s) => s,
            Signature::Pattern(re) => re.as_str(),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Signature::Pattern(_))
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.as_str() == other.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_signature_is_substring() -> Result<(), regex::Error> {
        let sig = Signature::parse("NoSuchBucket")?;
        assert!(!sig.is_pattern());
        assert_eq!(sig.find("<Code>NoSuchBucket</Code>"), Some(6..18));
        assert_eq!(sig.find("nosuchbucket"), None);
        Ok(())
    }

    #[test]
    fn test_slash_delimited_signature_is_regex() -> Result<(), regex::Error> {
        let sig = Signature::parse(r"/Tunnel .*\.ngrok\.io not found/")?;
        assert!(sig.is_pattern());
        assert!(sig.find("Tunnel abc123.ngrok.io not found").is_some());
        assert!(sig.find("Tunnel is fine").is_none());
        Ok(())
    }

    #[test]
    fn test_lone_slash_is_substring() -> Result<(), regex::Error> {
        assert!(!Signature::parse("/")?.is_pattern());
        assert!(!Signature::parse("//")?.is_pattern());
        Ok(())
    }

    #[test]
    fn test_invalid_regex_is_error() {
        assert!(Signature::parse("/(unclosed/").is_err());
    }

    #[test]
    fn test_empty_substring_never_matches() {
        assert_eq!(Signature::substring("").find("anything"), None);
    }

    #[test]
    fn test_cname_patterns_case_insensitive() {
        let fp = Fingerprint::new("GitHub Pages", Signature::substring("x"))
            .with_cnames(["GitHub.io", " "]);
        assert_eq!(fp.cname_patterns, vec!["github.io".to_string()]);
        assert!(fp.find_cname("Org.GITHUB.IO").is_some());
        assert!(fp.find_cname("example.com").is_none());
    }
}
