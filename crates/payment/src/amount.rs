//! Monetary conversion at the gateway boundary.
//!
//! PayMongo transmits amounts as integral centavos; everything
//! user-facing in this codebase is a decimal peso value. Conversion is
//! multiply-by-100-and-truncate, in both directions, so a malformed
//! fractional centavo can never round a charge upward.

/// Decimal pesos to integral centavos, truncating.
pub fn pesos_to_centavos(pesos: f64) -> i64 {
  (pesos * 100.0).trunc() as i64
}

/// Integral centavos back to decimal pesos.
pub fn centavos_to_pesos(centavos: i64) -> f64 {
  (centavos as f64) / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_flat_fee() {
    assert_eq!(50000, pesos_to_centavos(500.0));
    assert_eq!(500.0, centavos_to_pesos(50000));
  }

  #[test]
  fn test_truncates_sub_centavo() {
    assert_eq!(1999, pesos_to_centavos(19.999));
    assert_eq!(0, pesos_to_centavos(0.009));
  }

  #[test]
  fn test_round_trip_whole_centavos() {
    for centavos in [1, 99, 100, 12345, 50000] {
      assert_eq!(centavos, pesos_to_centavos(centavos_to_pesos(centavos)));
    }
  }
}
