pub mod canvas;
pub mod encoder;
pub mod events;
pub mod rasterizer;
pub mod surface;
pub mod target;
pub mod timer;
pub mod viewport;

pub use canvas::{IndexedCanvas, MAX_PALETTE};
pub use encoder::{EncodedImage, ImageEncoder, PngDataUriEncoder, PNG_DATA_URI_PREFIX};
pub use events::{BindingError, BindingMechanism, EventBinder, FlagBinding};
pub use rasterizer::{rasterize, render, RenderOutcome};
pub use surface::{MemoryDisplay, MemoryPanel, Panel, PanelContent, PanelFactory, PanelState};
pub use target::{sample, sample_all, Target};
pub use timer::{CancelToken, Countdown, Debouncer, Fired};
pub use viewport::{FixedViewport, SharedViewport, ViewportProbe, ViewportSize, ViewportSource};
