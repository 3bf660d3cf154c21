use serde::{Deserialize, Serialize};

/// Axis-aligned screen rectangle, `y` grows downwards.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Intersection with `bounds`; `None` when the overlap has no area.
    pub fn clip(&self, bounds: &Rect) -> Option<Rect> {
        let left = self.x.max(bounds.x);
        let top = self.y.max(bounds.y);
        let right = self.right().min(bounds.right());
        let bottom = self.bottom().min(bounds.bottom());

        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_inside() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.clip(&bounds), Some(rect));
    }

    #[test]
    fn test_clip_straddling() {
        let bounds = Rect::new(0.0, 50.0, 100.0, 100.0);
        let rect = Rect::new(90.0, 30.0, 20.0, 40.0);
        assert_eq!(rect.clip(&bounds), Some(Rect::new(90.0, 50.0, 10.0, 20.0)));
    }

    #[test]
    fn test_clip_outside_or_touching() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(Rect::new(0.0, 100.0, 10.0, 10.0).clip(&bounds), None);
        assert_eq!(Rect::new(-20.0, 0.0, 20.0, 10.0).clip(&bounds), None);
        assert_eq!(Rect::new(200.0, 200.0, 5.0, 5.0).clip(&bounds), None);
    }
}
