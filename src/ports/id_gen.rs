//! ID generator port for producing unique identifiers.

/// Attempts [`unique_id`] makes before giving up.
const MAX_ATTEMPTS: usize = 16;

/// Generates identifiers for stored tasks and notes.
///
/// Short ids can collide; stores check new ids against existing ones with
/// [`unique_id`].
pub trait IdGenerator: Send + Sync {
    /// Generates a new identifier string.
    fn generate_id(&self) -> String;
}

/// Draws ids from `ids` until one is not `taken`.
///
/// # Errors
///
/// Returns an error if every attempt collides with an existing id.
pub fn unique_id(
    ids: &dyn IdGenerator,
    taken: impl Fn(&str) -> bool,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    for _ in 0..MAX_ATTEMPTS {
        let id = ids.generate_id();
        if !taken(&id) {
            return Ok(id);
        }
        log::debug!("Generated id {id} is already in use, drawing another");
    }
    Err(format!("Could not generate an unused id after {MAX_ATTEMPTS} attempts").into())
}
