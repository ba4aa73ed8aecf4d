use std::collections::BTreeMap;

pub const TRAILING_DELAY_MS: u32 = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractiveKind {
    HeaderName,
    Button,
    Link,
    Navigation,
}

impl InteractiveKind {
    pub const HEADER_NAME_CLASS: &'static str = "header-name";

    /// Classifies one element of an event's ancestor chain.
    pub fn classify(tag_name: &str, class_name: &str) -> Option<Self> {
        if class_name
            .split_ascii_whitespace()
            .any(|class| class == Self::HEADER_NAME_CLASS)
        {
            return Some(Self::HeaderName);
        }

        match tag_name.to_ascii_lowercase().as_str() {
            "button" => Some(Self::Button),
            "a" => Some(Self::Link),
            "nav" => Some(Self::Navigation),
            _ => None,
        }
    }
}

/// Returns the first qualifying element walking from the target outwards.
pub fn closest_interactive<T, I>(chain: I) -> Option<T>
where
    I: IntoIterator<Item = (T, String, String)>,
{
    chain
        .into_iter()
        .find(|(_, tag_name, class_name)| InteractiveKind::classify(tag_name, class_name).is_some())
        .map(|(element, _, _)| element)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub primary: Point,
    pub trailing: Point,
    pub hovering: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerTracker {
    state: PointerState,
    pending: BTreeMap<u64, Point>,
    next_ticket: u64,
}

impl PointerTracker {
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Moves the primary marker and returns the ticket of the trailing update
    /// that must be applied after [`TRAILING_DELAY_MS`].
    pub fn on_move(&mut self, at: Point) -> u64 {
        self.state.primary = at;
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending.insert(ticket, at);
        ticket
    }

    pub fn on_trailing_elapsed(&mut self, ticket: u64) -> bool {
        match self.pending.remove(&ticket) {
            Some(at) => {
                self.state.trailing = at;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn pending_trailing(&self) -> usize {
        self.pending.len()
    }

    /// `qualifying` is the closest interactive ancestor of the entered element.
    pub fn on_enter<T>(&mut self, qualifying: Option<T>) {
        if qualifying.is_some() {
            self.state.hovering = true;
        }
    }

    /// `from` is the closest interactive ancestor of the element being left,
    /// `to` the one of the element being entered (the related target).
    pub fn on_leave<T: PartialEq>(&mut self, from: Option<T>, to: Option<T>) {
        if from.is_none() {
            return;
        }

        if to.is_some() && to == from {
            return;
        }

        self.state.hovering = to.is_some();
    }

    pub fn teardown(&mut self) {
        self.pending.clear();
        self.state.hovering = false;
    }
}
