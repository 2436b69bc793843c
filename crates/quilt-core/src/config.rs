//! Configuration for Quilt drag & drop.

/// Runtime configuration shared by the drag & drop manager.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which native pointer listeners droppables attach.
    pub touch: TouchSupport,
    /// Default `tracing` filter used by [`crate::logging::init`] when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Class names toggled on elements as behaviors change state.
    pub classes: ClassNames,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            touch: TouchSupport::Off,
            log_filter: "info,quilt_dd=debug".to_string(),
            classes: ClassNames::default(),
        }
    }
}

impl Config {
    /// Set the touch support mode.
    pub fn touch(mut self, touch: TouchSupport) -> Self {
        self.touch = touch;
        self
    }

    /// Set the default log filter.
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Replace the class names.
    pub fn classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchSupport {
    /// Only mouse enter/leave listeners are attached
    #[default]
    Off,
    /// Pointer enter/leave listeners are attached as well, and delegate to the same
    /// enter/leave handling as the mouse ones
    On,
}

impl TouchSupport {
    pub fn is_on(&self) -> bool {
        matches!(self, TouchSupport::On)
    }
}

/// Class names used to reflect behavior state on elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    pub droppable: String,
    pub droppable_disabled: String,
    pub droppable_over: String,
    pub draggable: String,
    pub draggable_disabled: String,
    pub draggable_dragging: String,
    pub resizable: String,
    pub resizable_disabled: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            droppable: "ui-droppable".to_string(),
            droppable_disabled: "ui-droppable-disabled".to_string(),
            droppable_over: "ui-droppable-over".to_string(),
            draggable: "ui-draggable".to_string(),
            draggable_disabled: "ui-draggable-disabled".to_string(),
            draggable_dragging: "ui-draggable-dragging".to_string(),
            resizable: "ui-resizable".to_string(),
            resizable_disabled: "ui-resizable-disabled".to_string(),
        }
    }
}
