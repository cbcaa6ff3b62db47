/// Errors raised while parsing or driving one model round-trip.
///
/// Every variant aborts the current round-trip only; none of them terminate
/// the process or trigger an automatic retry.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("model returned an empty reply")]
    EmptyResponse,

    #[error("model reply is not valid JSON: {source}\n--- raw reply ---\n{raw}")]
    MalformedJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model reply has an unrecognized step tag: {0:?}")]
    UnrecognizedStep(Option<String>),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("malformed tool input: {0}")]
    MalformedToolInput(String),

    #[error("query exceeded the round-trip limit ({0})")]
    RoundTripLimitExceeded(usize),
}
