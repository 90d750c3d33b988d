use std::str::FromStr;

use crate::macros::id;

id!(ContactSessionId);

impl FromStr for ContactSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<uuid::Uuid>().map(Self::new)
    }
}
