use crate::repository::NewTicket;

use super::ValidationError;

const MAX_FIELD_LEN: usize = 100;

/// Validates the trip fields of a new ticket submission.
pub fn validate_new_ticket(ticket: &NewTicket) -> Result<(), ValidationError> {
    for location in [&ticket.from_location, &ticket.to_location] {
        if location.trim().is_empty() {
            return Err(ValidationError::LocationEmpty);
        }
        if location.len() > MAX_FIELD_LEN {
            return Err(ValidationError::LocationTooLong);
        }
    }

    if ticket.purpose_of_travel.trim().is_empty() {
        return Err(ValidationError::PurposeEmpty);
    }
    if ticket.purpose_of_travel.len() > MAX_FIELD_LEN {
        return Err(ValidationError::PurposeTooLong);
    }

    if ticket.end_date < ticket.start_date {
        return Err(ValidationError::DateRangeInverted);
    }

    Ok(())
}
