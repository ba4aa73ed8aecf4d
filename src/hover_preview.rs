use crate::pointer::Point;

pub const PREVIEW_OFFSET_X: f64 = 20.0;
pub const PREVIEW_OFFSET_Y: f64 = -60.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverPreview {
    session: Option<Point>,
}

impl HoverPreview {
    pub fn enter(&mut self, at: Point) {
        self.session = Some(at);
    }

    pub fn track(&mut self, at: Point) {
        if let Some(pointer) = self.session.as_mut() {
            *pointer = at;
        }
    }

    pub fn leave(&mut self) {
        self.session = None;
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn position(&self) -> Option<Point> {
        self.session
            .map(|pointer| pointer.offset(PREVIEW_OFFSET_X, PREVIEW_OFFSET_Y))
    }
}
