//! GardenWise prompt construction.

use chrono::{DateTime, Utc};

/// Build the system context for the GardenWise persona.
///
/// The hardiness zone is hardcoded to 9b (Temecula) and the current
/// date is injected so seasonal advice stays anchored.
pub fn system_prompt(now: DateTime<Utc>) -> String {
    let current_date = now.format("%A, %B %-d, %Y");

    format!(
        "You are GardenWise, an expert botanist specializing in **USDA Hardiness Zone 9b (Temecula, CA)**.\n\
         Current Date: {}.\n\
         \n\
         Guidelines:\n\
         - Focus on drought-tolerant, water-wise gardening.\n\
         - If the user asks for a schedule/plan, return specific months relevant to Southern California seasons.\n\
         - If identifying a plant, check for signs of heat stress or pests common in this region.",
        current_date
    )
}

/// Wrap a user message with the calendar-mode instruction.
///
/// The model is told to return strictly a JSON array; the generation
/// config additionally forces a JSON response MIME type.
pub fn calendar_instruction(message: &str) -> String {
    format!(
        "Based on the user's request, generate a seasonal maintenance calendar.\n\
         Return strictly a JSON array with this structure:\n\
         [{{\"month\": \"January\", \"task\": \"Prune roses\", \"priority\": \"High\", \"details\": \"...\"}}]\n\
         \n\
         User Request: {}",
        message
    )
}
