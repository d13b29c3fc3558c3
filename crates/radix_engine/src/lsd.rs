use crate::digits::{digit_at, RADIX};

/// One stable counting-sort pass keyed on the digit at `exp`.
///
/// Counts become prefix sums so `count[d]` is one past the last output slot for
/// digit `d`; scanning the input back to front then keeps equal keys in order.
pub(crate) fn counting_sort_pass(sequence: &mut [u64], exp: u32) {
    let mut count = [0usize; RADIX as usize];
    for &number in sequence.iter() {
        count[digit_at(number, exp) as usize] += 1;
    }
    for i in 1..count.len() {
        count[i] += count[i - 1];
    }

    let mut output = vec![0u64; sequence.len()];
    for &number in sequence.iter().rev() {
        let digit = digit_at(number, exp) as usize;
        count[digit] -= 1;
        output[count[digit]] = number;
    }
    sequence.copy_from_slice(&output);
}
