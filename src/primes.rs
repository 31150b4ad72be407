//! Prime search for chain-array growth.

/// Smallest prime `>= n`. Anything `<= 1` maps to 2.
pub(crate) fn next_prime(n: usize) -> usize {
    if n <= 1 {
        return 2;
    }
    let mut candidate = n;
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

/// Trial division by 2, then by odd divisors up to `sqrt(n)`.
pub(crate) fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d = 3;
    // `d <= n / d` is `d * d <= n` without overflow.
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
