//! Page sections in document order.

/// Top-level regions of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    Services,
    Projects,
    Contact,
    Footer,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Home,
        SectionId::Services,
        SectionId::Projects,
        SectionId::Contact,
        SectionId::Footer,
    ];

    /// Fragment anchor (`#services`) used by nav links.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "#home",
            SectionId::Services => "#services",
            SectionId::Projects => "#projects",
            SectionId::Contact => "#contact",
            SectionId::Footer => "#footer",
        }
    }

    /// Resolve a nav label or anchor ("Services", "#services") to a section.
    pub fn from_anchor(anchor: &str) -> Option<SectionId> {
        let name = anchor.trim_start_matches('#');
        SectionId::ALL
            .into_iter()
            .find(|id| id.anchor()[1..].eq_ignore_ascii_case(name))
    }
}
