mod bus;
mod events;

pub use bus::EventBus;
pub use events::SurfaceEvent;

/// Receives outbound surface notifications
pub trait EventHandler {
    fn handle_event(&mut self, event: &SurfaceEvent);
}

impl<F: FnMut(&SurfaceEvent)> EventHandler for F {
    fn handle_event(&mut self, event: &SurfaceEvent) {
        self(event)
    }
}
