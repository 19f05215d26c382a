pub mod message_builder;
pub mod response_parser;
pub mod udp;

pub use message_builder::MessageBuilder;
pub use response_parser::ResponseParser;
pub use udp::UdpExchange;
