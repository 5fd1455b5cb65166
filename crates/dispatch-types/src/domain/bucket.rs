use std::fmt;

/// One of the four independently polled client-side order groupings.
///
/// Cancelled orders have no bucket; cancellation only removes an order
/// from whichever bucket last polled it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Incoming,
    Accepted,
    InProgress,
    Completed,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Incoming,
        Bucket::Accepted,
        Bucket::InProgress,
        Bucket::Completed,
    ];

    /// GET endpoint listing this bucket, relative to the base origin.
    pub fn list_path(&self) -> &'static str {
        match self {
            Bucket::Incoming => "api/incoming-orders",
            Bucket::Accepted => "api/accepted-orders",
            Bucket::InProgress => "api/in-progress-orders",
            Bucket::Completed => "api/completed-orders",
        }
    }

    /// Name of the array field wrapping the order list in the response
    /// body. The in-progress endpoint breaks the `<bucket>_orders` pattern.
    pub fn list_field(&self) -> &'static str {
        match self {
            Bucket::Incoming => "incoming_orders",
            Bucket::Accepted => "accepted_orders",
            Bucket::InProgress => "orders",
            Bucket::Completed => "completed_orders",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Incoming => "incoming",
            Bucket::Accepted => "accepted",
            Bucket::InProgress => "in-progress",
            Bucket::Completed => "completed",
        };
        f.write_str(name)
    }
}
