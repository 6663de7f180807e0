use crate::{ScreeningError, ServerReply};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A status query returned a decodable body.
    StatusReceived(ServerReply),
    /// A status query failed in transport, HTTP status or decoding.
    QueryFailed(ScreeningError),
}
