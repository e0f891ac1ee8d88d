//! Latest-value price table shared by both contracts.

use soroban_sdk::{Env, String, Vec};

use crate::{DataKey, PERSISTENT_TTL_EXTEND, PERSISTENT_TTL_THRESHOLD};

/// Overwrites the stored price of every name, in order. A name repeated in
/// one batch ends up with its last price.
pub fn store_batch(env: &Env, names: &Vec<String>, prices: &Vec<u128>) {
    for (name, price) in names.iter().zip(prices.iter()) {
        let key = DataKey::Price(name);
        env.storage().persistent().set(&key, &price);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
    }
}

/// Last written price for `name`; zero when never written.
pub fn get_price(env: &Env, name: &String) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Price(name.clone()))
        .unwrap_or(0)
}

pub fn get_prices(env: &Env, names: &Vec<String>) -> Vec<u128> {
    let mut out = Vec::new(env);
    for name in names.iter() {
        out.push_back(get_price(env, &name));
    }
    out
}
