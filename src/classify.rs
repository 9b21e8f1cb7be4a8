//! Domain categorization for the dashboard's Category column.
//!
//! A fixed, priority-ordered rule table matched case-insensitively by
//! substring; the first matching rule wins. The table is a value so tests
//! can inject alternates.

/// One classification rule: any token matching anywhere in the domain
/// assigns the category.
#[derive(Clone, Debug)]
pub struct Rule {
    tokens: Vec<String>,
    category: String,
}

impl Rule {
    pub fn new<I, S>(tokens: I, category: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
            category: category.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Category assigned when no rule matches.
pub const FALLBACK_CATEGORY: &str = "Unknown";

/// A compiled rule table for domain categorization.
#[derive(Clone, Debug)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Create a classifier from an ordered rule list.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Categorize a queried domain. Priority order is authoritative: the
    /// first rule with a matching token decides, even when later rules
    /// would also match.
    pub fn classify(&self, domain: &str) -> String {
        let domain = domain.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.tokens.iter().any(|token| domain.contains(token.as_str())))
            .map_or_else(|| FALLBACK_CATEGORY.to_string(), |rule| rule.category.clone())
    }
}

impl Default for Classifier {
    /// The built-in rule table, preserved exactly for behavioral parity
    /// with existing logs.
    fn default() -> Self {
        Self::new(vec![
            Rule::new(["apple", "icloud.com", "mask-api"], "Apple"),
            Rule::new(
                ["google.com", "googleapis.com", "gstatic.com", "dns.google"],
                "Google",
            ),
            Rule::new(["cloudflare-dns.com"], "DNS Service"),
            Rule::new(
                [
                    "facebook.com",
                    "instagram.com",
                    "tiktok.com",
                    "twitter.com",
                    "x.com",
                    "snapchat.com",
                    "reddit.com",
                    "discord.com",
                ],
                "Social / Community",
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_apple_domains() {
        let classifier = Classifier::default();

        assert_eq!(classifier.classify("host.icloud.com"), "Apple");
        assert_eq!(classifier.classify("mask-api.example.net"), "Apple");
        assert_eq!(classifier.classify("gateway.push.apple.com"), "Apple");
    }

    #[test]
    fn should_prefer_earlier_rules_on_multiple_matches() {
        let classifier = Classifier::default();

        // Contains both "apple" and "google.com"; Apple is listed first.
        assert_eq!(classifier.classify("apple.google.com"), "Apple");
    }

    #[test]
    fn should_match_case_insensitively() {
        let classifier = Classifier::default();

        assert_eq!(classifier.classify("WWW.GSTATIC.COM"), "Google");
        assert_eq!(classifier.classify("Reddit.Com"), "Social / Community");
    }

    #[test]
    fn should_classify_dns_services() {
        let classifier = Classifier::default();

        assert_eq!(classifier.classify("mozilla.cloudflare-dns.com"), "DNS Service");
    }

    #[test]
    fn should_fall_back_to_unknown() {
        let classifier = Classifier::default();

        assert_eq!(classifier.classify("example.com"), "Unknown");
        assert_eq!(classifier.classify(""), "Unknown");
    }

    #[test]
    fn should_accept_injected_rule_tables() {
        let classifier = Classifier::new(vec![Rule::new(["honeypot"], "Bait")]);

        assert_eq!(classifier.classify("login.honeypot.lan"), "Bait");
        assert_eq!(classifier.classify("google.com"), "Unknown");
    }
}
