//! Pick the best valid candidate from an ordered list

/// Reduce `candidates` to the best one satisfying `is_valid`
///
/// `is_better(candidate, current)` returns true when `candidate` should
/// replace the current best. A candidate that is merely equal never replaces
/// it, so the earliest of several equal candidates wins.
pub fn select_best<T, I, V, B>(candidates: I, is_valid: V, is_better: B) -> Option<T>
where
    I: IntoIterator<Item = T>,
    V: Fn(&T) -> bool,
    B: Fn(&T, &T) -> bool,
{
    candidates.into_iter().fold(None, |best, candidate| {
        if !is_valid(&candidate) {
            return best;
        }
        match best {
            Some(current) if !is_better(&candidate, &current) => Some(current),
            _ => Some(candidate),
        }
    })
}
