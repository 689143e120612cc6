/// A tagged block of the model's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Title,
    Description,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Title => "title",
            Section::Description => "description",
        }
    }

    pub fn start_tag(self) -> &'static str {
        match self {
            Section::Title => "[title:start]",
            Section::Description => "[description:start]",
        }
    }

    pub fn end_tag(self) -> &'static str {
        match self {
            Section::Title => "[title:end]",
            Section::Description => "[description:end]",
        }
    }

    pub fn extract(self, text: &str) -> Option<String> {
        extract_section(text, self.start_tag(), self.end_tag())
    }
}

/// Text after the first `start`, up to the first `end` that follows it, trimmed.
pub fn extract_section(text: &str, start: &str, end: &str) -> Option<String> {
    let (_, rest) = text.split_once(start)?;
    let (inner, _) = rest.split_once(end)?;
    Some(inner.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_both_sections_in_either_order() {
        let forward = "[title:start]X[title:end][description:start]Y[description:end]";
        let reversed = "[description:start]Y[description:end][title:start]X[title:end]";

        for text in [forward, reversed] {
            assert_eq!(Section::Title.extract(text).as_deref(), Some("X"));
            assert_eq!(Section::Description.extract(text).as_deref(), Some("Y"));
        }
    }

    #[test]
    fn inner_text_is_trimmed_and_keeps_markdown() {
        let text = "noise\n[description:start]\n## What\nFixed it\n\n[description:end]\ntrailer";
        assert_eq!(
            Section::Description.extract(text).as_deref(),
            Some("## What\nFixed it")
        );
    }

    #[test]
    fn missing_tags_yield_none() {
        assert_eq!(Section::Title.extract(""), None);
        assert_eq!(Section::Title.extract("plain answer"), None);
        assert_eq!(Section::Title.extract("[title:start]dangling"), None);
        assert_eq!(Section::Title.extract("dangling[title:end]"), None);
    }

    #[test]
    fn first_pair_wins() {
        let text = "[title:start] a [title:end][title:start] b [title:end]";
        assert_eq!(extract_section(text, "[title:start]", "[title:end]").as_deref(), Some("a"));
    }

    #[test]
    fn empty_section_is_some_empty() {
        assert_eq!(
            Section::Title.extract("[title:start]  [title:end]").as_deref(),
            Some("")
        );
    }
}
