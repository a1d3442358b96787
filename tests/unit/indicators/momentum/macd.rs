//! Unit tests for MACD indicator

use confluence::indicators::momentum::{calculate_macd, calculate_macd_default};

fn flat_then_move(step: f64) -> Vec<f64> {
    let mut prices = vec![100.0; 30];
    prices.extend((1..=10).map(|i| 100.0 + step * i as f64));
    prices
}

#[test]
fn test_macd_insufficient_data() {
    let prices: Vec<f64> = (0..34).map(|i| 100.0 + i as f64).collect();
    assert!(calculate_macd_default(&prices).is_none());
}

#[test]
fn test_macd_minimum_length() {
    let prices: Vec<f64> = (0..35).map(|i| 100.0 + i as f64).collect();
    assert!(calculate_macd_default(&prices).is_some());
}

#[test]
fn test_macd_flat_prices_is_zero() {
    let macd = calculate_macd_default(&vec![1.1; 40]).unwrap();
    assert_eq!(macd.macd, 0.0);
    assert_eq!(macd.signal, 0.0);
    assert_eq!(macd.histogram, 0.0);
}

#[test]
fn test_macd_small_periods() {
    let macd = calculate_macd(&[1.0, 2.0, 3.0, 4.0, 5.0], 2, 3, 2).unwrap();
    assert_eq!(macd.macd, 0.5);
    assert_eq!(macd.signal, 0.5);
    assert_eq!(macd.histogram, 0.0);
}

#[test]
fn test_macd_breakout_up() {
    let macd = calculate_macd_default(&flat_then_move(1.0)).unwrap();
    assert_eq!(macd.macd, 2.24);
    assert_eq!(macd.signal, 1.32);
    assert_eq!(macd.histogram, 0.92);
}

#[test]
fn test_macd_breakout_down() {
    let macd = calculate_macd_default(&flat_then_move(-1.0)).unwrap();
    assert_eq!(macd.macd, -2.24);
    assert_eq!(macd.signal, -1.32);
    assert_eq!(macd.histogram, -0.92);
}
