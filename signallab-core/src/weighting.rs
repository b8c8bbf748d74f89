//! Weighted combination of category scores under a regime's weight table.
//!
//! weighted = Σ(score_c · w_c) / Σ(w_c for c present), clipped to [-1, 1].
//! Dividing by the weights actually present keeps a partial score vector on
//! the same scale; a zero total weight yields 0.

use crate::config::WeightTable;
use crate::regime::Regime;
use crate::scoring::ScoreVector;

pub fn weighted_score(scores: &ScoreVector, weights: &WeightTable, regime: Regime) -> f64 {
    let table = weights.for_regime(regime);
    let (weighted_sum, total_weight) = scores
        .iter()
        .filter_map(|(category, score)| table.get(&category).map(|w| (score * w, *w)))
        .fold((0.0, 0.0), |(sum, total), (ws, w)| (sum + ws, total + w));

    if total_weight <= 0.0 {
        return 0.0;
    }
    (weighted_sum / total_weight).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;
    use crate::scoring::Category;

    #[test]
    fn uniform_scores_pass_through() {
        let scores = ScoreVector::from_scores(Category::ALL.map(|c| (c, 0.4)));
        let table = WeightTable::default();
        for regime in [Regime::Trend, Regime::Range, Regime::Transition, Regime::Unknown] {
            assert_approx(weighted_score(&scores, &table, regime), 0.4, 1e-12);
        }
    }

    #[test]
    fn trend_weights_favor_momentum() {
        // momentum 1.0 at 0.40, everything else 0 → 0.4 in trend, 0.15 in range
        let scores = ScoreVector::from_scores(
            Category::ALL.map(|c| (c, if c == Category::Momentum { 1.0 } else { 0.0 })),
        );
        let table = WeightTable::default();
        assert_approx(weighted_score(&scores, &table, Regime::Trend), 0.40, 1e-12);
        assert_approx(weighted_score(&scores, &table, Regime::Range), 0.15, 1e-12);
    }

    #[test]
    fn partial_vector_renormalizes() {
        // Only rsi (0.25) and bollinger (0.25) present in range → plain mean
        let scores = ScoreVector::from_scores([(Category::Rsi, 1.0), (Category::Bollinger, 0.0)]);
        assert_approx(
            weighted_score(&scores, &WeightTable::default(), Regime::Range),
            0.5,
            1e-12,
        );
    }

    #[test]
    fn empty_vector_is_zero() {
        assert_eq!(
            weighted_score(&ScoreVector::default(), &WeightTable::default(), Regime::Trend),
            0.0
        );
    }
}
