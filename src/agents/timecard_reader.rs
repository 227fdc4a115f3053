//! Timecard Reader Agent.
//!
//! Sends a photographed timecard sheet to the vision backend with a
//! fixed extraction prompt and normalizes the answer into timecards.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::backend::{ImagePayload, VisionBackend, VisionRequest};
use super::{Agent, AgentError};
use crate::models::Timecard;
use crate::normalize::parse_timecards;

const EXTRACTION_PROMPT: &str = r#"**Task:** Extract working hours from multiple timecards in an image.

**Input:** An image containing multiple timecards.

**Output:** A JSON list of timecard data, where each item represents a timecard and has the following structure:
```json
[
  {
    "name": "Taha",
    "days": [
      {
        "day": "1st Day",
        "time_in": "08:00 AM",
        "time_out": "04:30 PM"
      },
      {
        "day": "2nd Day",
        "time_in": "09:00 AM",
        "time_out": "05:00 PM"
      }
    ]
  },
  {
    "name": "Timecard 2",
    "days": [
      {
        "day": "3rd Day",
        "time_in": "08:30 AM",
        "time_out": "04:00 PM"
      }
    ]
  }
]
```
**Constraints:**

* If a name is not present on a timecard, label it as "Timecard 1", "Timecard 2", etc. based on the order of the timecard
* Only include days that have time ins and outs. Ignore the rest
* Use day labels like "1st Day", "2nd Day", "3rd Day", etc., based on the order it appears.
* Use 12-hour time format with AM/PM.
* Only reply in JSON."#;

/// Timecard Reader agent implementation.
pub struct TimecardReaderAgent {
    backend: Arc<dyn VisionBackend>,
}

impl TimecardReaderAgent {
    pub fn new(backend: Arc<dyn VisionBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Agent for TimecardReaderAgent {
    type Input = ImagePayload;
    type Output = Vec<Timecard>;

    fn name(&self) -> &'static str {
        "timecard_reader"
    }

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError> {
        info!(
            backend = self.backend.name(),
            bytes = input.bytes.len(),
            "Running Timecard Reader"
        );

        let request = VisionRequest {
            prompt: EXTRACTION_PROMPT.to_string(),
            image: input,
        };

        let raw = self.backend.extract(request).await?;
        debug!("Vision response: {}", raw);

        let cards = parse_timecards(&raw)?;

        info!("Timecard Reader found {} timecards", cards.len());

        Ok(cards)
    }
}
