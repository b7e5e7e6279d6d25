pub mod compile_time {
    pub mod driver {
        /// Maximum number of tokens a single bulk tokenization may produce
        /// SECURITY: Prevents DoS via token explosion on pathological input
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Maximum explicit token text length accepted by the driver (1MB)
        /// SECURITY: Prevents memory exhaustion via enormous text overrides
        pub const MAX_TOKEN_TEXT_LENGTH: usize = 1_048_576;

        /// Mode stack depth beyond which a warning is logged
        /// RESOURCE: Deeply nested modes usually indicate a grammar bug
        pub const MODE_DEPTH_WARNING: usize = 64;

        /// Maximum number of error listeners attached to one driver
        /// RESOURCE: Bounds per-error dispatch work
        pub const MAX_LISTENER_COUNT: usize = 16;
    }

    pub mod logging {
        /// Log buffer size for the in-memory logger
        /// RESOURCE: Controls memory usage for captured events
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Default minimum level when no preference is configured
        /// 0 = error .. 3 = debug
        pub const MIN_EVENT_LOG_LEVEL: u8 = 3;
    }
}
