// #![no_std]

mod bulk_only_transport;

pub use bulk_only_transport::{
    BulkOnlyTransport,
    CommandBlockWrapper,
    TransferState,
    Error,
};

mod logging {
    pub use log::debug as trace_bot_headers;
    pub use log::debug as trace_bot_states;
    pub use log::trace as trace_bot_bytes;
    pub use log::trace as trace_bot_zlp;
    pub use log::trace as trace_bot_buffer;
    pub use log::debug as trace_usb_control;
}
