/// Largest `n` in `[0, max]` for which `fits(n)` holds, by binary search.
///
/// `fits` is assumed monotone (true up to some point, false after). Returns
/// `None` when even `fits(0)` is false. Calls `fits` at most
/// `floor(log2(max + 1)) + 1` times.
pub fn find_max_fitting_length(max: usize, mut fits: impl FnMut(usize) -> bool) -> Option<usize> {
    let mut lo = 0usize;
    let mut hi = max;
    let mut best = None;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let ok = fits(mid);
        log::trace!(target: "truncate.search", "candidate {mid} in [{lo}, {hi}]: fits={ok}");
        if ok {
            best = Some(mid);
            lo = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            hi = mid - 1;
        }
    }

    best
}
