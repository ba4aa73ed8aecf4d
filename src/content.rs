use crate::section::EducationTab;

pub const OWNER_NAME: &str = "Marc Aedrian";
pub const OWNER_SURNAME: &str = "Andres.";
pub const BRAND: &str = "mrcandres.";
pub const ROLE: &str = "Full-Stack / Frontend Developer";
pub const LOCATION: &str = "Cauayan City, Isabela";
pub const CONTACT_EMAIL: &str = "hed-maandres@smu.edu.ph";
pub const SUMMARY: &str = "I am an Information Technology student specializing in full-stack web and mobile development. I enjoy building clean, functional, and scalable applications using modern technologies.";
pub const THESIS_TITLE: &str = "BantayBakir – QR-Based Tree Tagging GIS for DENR";
pub const THESIS_PREVIEW_IMAGE: &str = "/logo.png";

pub struct Skill {
    pub name: &'static str,
    pub description: &'static str,
    pub glyph: &'static str,
}

pub struct TimelineEntry {
    pub title: &'static str,
    pub detail: &'static str,
}

pub struct Project {
    pub name: &'static str,
    pub stack: &'static [&'static str],
    pub role: Option<&'static str>,
    pub summary: &'static str,
}

pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
    pub external: bool,
}

pub const SKILLS: &[Skill] = &[
    Skill { name: "React", description: "Modern UI library", glyph: "</>" },
    Skill { name: "JavaScript", description: "Dynamic programming", glyph: "{}" },
    Skill { name: "Git", description: "Version control", glyph: "⑂" },
    Skill { name: "MongoDB", description: "NoSQL database", glyph: "⛁" },
    Skill { name: "Node.js", description: "Server-side JS", glyph: "▤" },
    Skill { name: "Express.js", description: "Web framework", glyph: "≡" },
    Skill { name: "Expo", description: "React Native framework", glyph: "▯" },
    Skill { name: "Next.js", description: "React framework", glyph: "</>" },
];

const EDUCATION: &[TimelineEntry] = &[
    TimelineEntry {
        title: "Saint Mary's University",
        detail: "Bachelor of Science in Information Technology",
    },
    TimelineEntry {
        title: "Cauayan City National High School",
        detail: "Senior High",
    },
    TimelineEntry {
        title: "Cauayan City National High School",
        detail: "Junior High",
    },
];

const SEMINARS: &[TimelineEntry] = &[
    TimelineEntry {
        title: "AI Applications – University of Singapore (Online)",
        detail: "Applied AI tools and real-world use cases.",
    },
    TimelineEntry {
        title: "Flutter Seminar – Firebase Chat App",
        detail: "Built a real-time chat app with Firebase.",
    },
    TimelineEntry {
        title: "Code, Chat, Deploy – React + WebSockets",
        detail: "Built a live chat experience with sockets.",
    },
    TimelineEntry {
        title: "GitHub Seminar",
        detail: "Version control and collaboration workflows.",
    },
    TimelineEntry {
        title: "Fiber Optics Seminar",
        detail: "Networking fundamentals and fiber optics basics.",
    },
];

pub fn timeline(tab: EducationTab) -> &'static [TimelineEntry] {
    match tab {
        EducationTab::Education => EDUCATION,
        EducationTab::Seminar => SEMINARS,
    }
}

pub const PROJECTS: &[Project] = &[
    Project {
        name: "BantayBakir",
        stack: &["React Native", "Expo", "Firebase", "QR Code"],
        role: Some("Backend Developer"),
        summary: "QR-Based Tree Tagging GIS for DENR with real-time geolocation tracking, enabling accurate identification, monitoring, and mapping of individual trees in the field.",
    },
    Project {
        name: "TaraLaba",
        stack: &["REST API", "MongoDB", "Express.js"],
        role: Some("Backend Developer"),
        summary: "Laundry Management System with a RESTful API and integrated database management, handling orders, customer records, and service status.",
    },
    Project {
        name: "TaraKain",
        stack: &["React", "Vite", "Express", "MongoDB"],
        role: Some("Full-Stack Developer"),
        summary: "Menu Management System with full CRUD functionality and image upload, letting administrators create, update, and manage menu items.",
    },
    Project {
        name: "NexTransport",
        stack: &["Next.js", "TypeScript", "Supabase"],
        role: Some("Backend Developer"),
        summary: "Bus and Jeep booking web application with real-time availability tracking, seat selection, and secure payment processing.",
    },
    Project {
        name: "Flowerama",
        stack: &["Vite + React"],
        role: None,
        summary: "Simple flowering game built only with frontend technologies. Made for relaxing, and for Valentine's.",
    },
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink { label: "GitHub", href: "https://github.com/", external: true },
    SocialLink { label: "LinkedIn", href: "https://www.linkedin.com/", external: true },
    SocialLink { label: "Email", href: "mailto:marcaedrian67@gmail.com", external: false },
    SocialLink { label: "Facebook", href: "https://www.facebook.com/", external: true },
];
