//! RSI (Relative Strength Index) with simple rolling averages.
//!
//! - change[i] = close[i] - close[i-1]; the first bar has no prior close and
//!   contributes a zero gain and a zero loss.
//! - avg_gain / avg_loss: unweighted mean over the trailing n bars.
//! - RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! avg_loss == 0 with avg_gain > 0 gives RS = inf and RSI = 100. Both zero
//! gives NaN, which is left in the column.
//!
//! Warmup: first (n-1) bars are undefined.

use super::rolling;

pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());

    for (i, close) in closes.iter().enumerate() {
        let change = if i == 0 { 0.0 } else { close - closes[i - 1] };
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mean = |w: &[f64]| w.iter().sum::<f64>() / w.len() as f64;
    let avg_gain = rolling(&gains, period, mean);
    let avg_loss = rolling(&losses, period, mean);

    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(gain, loss)| {
            let (gain, loss) = (gain?, loss?);
            let rs = gain / loss;
            Some(100.0 - (100.0 / (1.0 + rs)))
        })
        .collect()
}
