//! Gesture Dispatcher
//!
//! One drag gesture model fed by two input adapters. Mouse and touch events are
//! translated into `drag_start` / `drag_move` / `drag_end(target)` calls on a
//! [`GestureSink`]; the [`GestureDispatcher`] turns those into at most one
//! [`DragResult`] per gesture.
//!
//! No DOM types appear here, so the whole state machine is testable natively.

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pressed but not yet moved past the threshold (still a click)
    Pending { origin: Point },
    Dragging { origin: Point, position: Point },
}

/// Outcome of a completed drag: the drop zone under the release point, if any
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragResult {
    pub target: Option<String>,
}

impl DragResult {
    pub fn landed_on(&self, zone: &str) -> bool {
        self.target.as_deref() == Some(zone)
    }
}

/// Gesture-level interface both input adapters feed
pub trait GestureSink {
    fn drag_start(&mut self, at: Point);
    fn drag_move(&mut self, to: Point);
    /// Finish the gesture. `None` when nothing was being dragged.
    fn drag_end(&mut self, target: Option<&str>) -> Option<DragResult>;
    fn cancel(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct GestureDispatcher {
    phase: GesturePhase,
}

impl GestureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Translation from the press point, for position feedback
    pub fn offset(&self) -> (i32, i32) {
        match self.phase {
            GesturePhase::Dragging { origin, position } => (position.x - origin.x, position.y - origin.y),
            _ => (0, 0),
        }
    }
}

impl GestureSink for GestureDispatcher {
    fn drag_start(&mut self, at: Point) {
        self.phase = GesturePhase::Pending { origin: at };
    }

    fn drag_move(&mut self, to: Point) {
        self.phase = match self.phase {
            GesturePhase::Idle => GesturePhase::Idle,
            GesturePhase::Pending { origin } => {
                let dx = (to.x - origin.x).abs();
                let dy = (to.y - origin.y).abs();
                if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                    GesturePhase::Dragging { origin, position: to }
                } else {
                    GesturePhase::Pending { origin }
                }
            }
            GesturePhase::Dragging { origin, .. } => GesturePhase::Dragging { origin, position: to },
        };
    }

    fn drag_end(&mut self, target: Option<&str>) -> Option<DragResult> {
        let was_dragging = self.is_dragging();
        self.phase = GesturePhase::Idle;
        was_dragging.then(|| DragResult {
            target: target.map(str::to_string),
        })
    }

    fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
    }
}

/// Translates mouse input; only the primary button starts a gesture
#[derive(Clone, Copy, Debug, Default)]
pub struct MouseAdapter;

impl MouseAdapter {
    pub fn down(&self, sink: &mut impl GestureSink, button: i16, at: Point) {
        if button == 0 {
            sink.drag_start(at);
        }
    }

    pub fn moved(&self, sink: &mut impl GestureSink, at: Point) {
        sink.drag_move(at);
    }

    pub fn up(&self, sink: &mut impl GestureSink, target: Option<&str>) -> Option<DragResult> {
        sink.drag_end(target)
    }
}

/// Translates touch input; follows one finger and gives up on multi-touch
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchAdapter {
    active: Option<i32>,
}

impl TouchAdapter {
    pub fn start(&mut self, sink: &mut impl GestureSink, touch_id: i32, touch_count: u32, at: Point) {
        if touch_count > 1 {
            self.cancel(sink);
            return;
        }
        self.active = Some(touch_id);
        sink.drag_start(at);
    }

    pub fn moved(&mut self, sink: &mut impl GestureSink, touch_id: i32, at: Point) {
        if self.active == Some(touch_id) {
            sink.drag_move(at);
        }
    }

    pub fn end(&mut self, sink: &mut impl GestureSink, touch_id: i32, target: Option<&str>) -> Option<DragResult> {
        if self.active != Some(touch_id) {
            return None;
        }
        self.active = None;
        sink.drag_end(target)
    }

    pub fn cancel(&mut self, sink: &mut impl GestureSink) {
        self.active = None;
        sink.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIN: &str = "recycle-bin";

    fn mouse_drag(dispatcher: &mut GestureDispatcher, to: Point, target: Option<&str>) -> Option<DragResult> {
        let mouse = MouseAdapter;
        mouse.down(dispatcher, 0, Point::new(100, 100));
        mouse.moved(dispatcher, Point::new(120, 110));
        mouse.moved(dispatcher, to);
        mouse.up(dispatcher, target)
    }

    #[test]
    fn test_mouse_drag_onto_zone() {
        let mut dispatcher = GestureDispatcher::new();
        let result = mouse_drag(&mut dispatcher, Point::new(600, 500), Some(BIN)).unwrap();
        assert!(result.landed_on(BIN));
        assert_eq!(dispatcher.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_mouse_drag_released_elsewhere() {
        let mut dispatcher = GestureDispatcher::new();
        let result = mouse_drag(&mut dispatcher, Point::new(50, 50), None).unwrap();
        assert!(!result.landed_on(BIN));
    }

    #[test]
    fn test_small_movement_is_a_click() {
        let mut dispatcher = GestureDispatcher::new();
        let mouse = MouseAdapter;
        mouse.down(&mut dispatcher, 0, Point::new(10, 10));
        mouse.moved(&mut dispatcher, Point::new(13, 12));
        assert!(!dispatcher.is_dragging());
        assert_eq!(mouse.up(&mut dispatcher, Some(BIN)), None);
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut dispatcher = GestureDispatcher::new();
        let mouse = MouseAdapter;
        mouse.down(&mut dispatcher, 2, Point::new(10, 10));
        mouse.moved(&mut dispatcher, Point::new(200, 200));
        assert_eq!(mouse.up(&mut dispatcher, Some(BIN)), None);
    }

    #[test]
    fn test_offset_tracks_position() {
        let mut dispatcher = GestureDispatcher::new();
        dispatcher.drag_start(Point::new(10, 20));
        dispatcher.drag_move(Point::new(40, 0));
        assert!(dispatcher.is_dragging());
        assert_eq!(dispatcher.offset(), (30, -20));
    }

    #[test]
    fn test_touch_drag_onto_zone() {
        let mut dispatcher = GestureDispatcher::new();
        let mut touch = TouchAdapter::default();
        touch.start(&mut dispatcher, 7, 1, Point::new(0, 0));
        touch.moved(&mut dispatcher, 7, Point::new(300, 400));

        let result = touch.end(&mut dispatcher, 7, Some(BIN)).unwrap();
        assert!(result.landed_on(BIN));
    }

    #[test]
    fn test_touch_ignores_other_fingers() {
        let mut dispatcher = GestureDispatcher::new();
        let mut touch = TouchAdapter::default();
        touch.start(&mut dispatcher, 1, 1, Point::new(0, 0));
        touch.moved(&mut dispatcher, 2, Point::new(300, 400));
        assert!(!dispatcher.is_dragging());
        assert_eq!(touch.end(&mut dispatcher, 2, Some(BIN)), None);
    }

    #[test]
    fn test_second_finger_cancels() {
        let mut dispatcher = GestureDispatcher::new();
        let mut touch = TouchAdapter::default();
        touch.start(&mut dispatcher, 1, 1, Point::new(0, 0));
        touch.moved(&mut dispatcher, 1, Point::new(50, 50));
        touch.start(&mut dispatcher, 2, 2, Point::new(60, 60));

        assert_eq!(dispatcher.phase(), GesturePhase::Idle);
        assert_eq!(touch.end(&mut dispatcher, 1, Some(BIN)), None);
    }

    #[test]
    fn test_touch_cancel_mid_drag() {
        let mut dispatcher = GestureDispatcher::new();
        let mut touch = TouchAdapter::default();
        touch.start(&mut dispatcher, 3, 1, Point::new(0, 0));
        touch.moved(&mut dispatcher, 3, Point::new(90, 90));
        touch.cancel(&mut dispatcher);
        assert_eq!(touch.end(&mut dispatcher, 3, Some(BIN)), None);
    }
}
