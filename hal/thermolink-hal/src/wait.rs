//! Bounded busy-waits on hardware status bits

/// A bounded wait ran out of polls before its condition became true
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout;

/// Poll `ready` until it returns true, at most `budget` times
///
/// Returns the number of polls it took. A budget of zero never polls and
/// always times out.
pub fn spin_until<F>(budget: u32, mut ready: F) -> Result<u32, Timeout>
where
    F: FnMut() -> bool,
{
    for polls in 1..=budget {
        if ready() {
            return Ok(polls);
        }
        core::hint::spin_loop();
    }
    Err(Timeout)
}
