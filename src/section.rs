#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    About,
    Skills,
    Education,
    Projects,
    Contact,
}

impl Section {
    /// Sections that own an element in the document, in document order.
    pub const TRACKED: [Section; 5] = [
        Self::About,
        Self::Skills,
        Self::Education,
        Self::Projects,
        Self::Contact,
    ];

    pub fn element_id(self) -> Option<&'static str> {
        match self {
            Self::Home => None,
            Self::About => Some("about"),
            Self::Skills => Some("skills"),
            Self::Education => Some("education"),
            Self::Projects => Some("projects"),
            Self::Contact => Some("contact"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Skills => "Skills",
            Self::Education => "Education/Seminar",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }

    pub fn nav_items() -> impl Iterator<Item = Section> {
        Self::TRACKED.into_iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionExtent {
    pub top: f64,
    pub height: f64,
}

impl SectionExtent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EducationTab {
    Education,
    Seminar,
}

impl EducationTab {
    pub fn title(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Seminar => "Seminar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_has_no_element() {
        assert_eq!(Section::Home.element_id(), None);
        assert!(Section::TRACKED.iter().all(|section| section.element_id().is_some()));
    }

    #[test]
    fn extent_is_half_open() {
        let extent = SectionExtent::new(500.0, 500.0);

        assert!(extent.contains(500.0));
        assert!(extent.contains(999.9));
        assert!(!extent.contains(1000.0));
        assert!(!extent.contains(499.9));
    }

    #[test]
    fn nav_items_follow_document_order() {
        let labels: Vec<_> = Section::nav_items().map(Section::label).collect();
        assert_eq!(
            labels,
            vec!["About", "Skills", "Education/Seminar", "Projects", "Contact"]
        );
    }
}
