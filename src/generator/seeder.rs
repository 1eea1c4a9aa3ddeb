use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::AppConfig;
use crate::types::{Agent, Customer, Dimensions, LookupRow, CHANNELS, PRIORITIES, STATUSES, TEAMS};

/// Fixed lookup rows, ids 1-based in declaration order.
pub fn lookup_rows(names: &[&str]) -> Vec<LookupRow> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| LookupRow {
            id: i as i64 + 1,
            name: name.to_string(),
        })
        .collect()
}

pub fn seed_customers<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<Customer> {
    (1..=count as i64)
        .map(|id| Customer {
            id,
            name: Name().fake_with_rng(rng),
            email: SafeEmail().fake_with_rng(rng),
        })
        .collect()
}

pub fn seed_agents<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<Agent> {
    (1..=count as i64)
        .map(|id| {
            let full_name: String = Name().fake_with_rng(rng);
            let email: String = SafeEmail().fake_with_rng(rng);
            let team = TEAMS.choose(rng).copied().unwrap_or(TEAMS[0]);
            Agent {
                id,
                full_name,
                email,
                team: team.to_string(),
            }
        })
        .collect()
}

pub fn seed_dimensions<R: Rng + ?Sized>(rng: &mut R, config: &AppConfig) -> Dimensions {
    Dimensions {
        priorities: lookup_rows(&PRIORITIES),
        statuses: lookup_rows(&STATUSES),
        channels: lookup_rows(&CHANNELS),
        customers: seed_customers(rng, config.customer_count),
        agents: seed_agents(rng, config.agent_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lookup_cardinalities_and_names() {
        let mut rng = StdRng::seed_from_u64(1);
        let dims = seed_dimensions(&mut rng, &AppConfig::default());

        assert_eq!(dims.priorities.len(), 4);
        assert_eq!(dims.statuses.len(), 3);
        assert_eq!(dims.channels.len(), 4);
        assert_eq!(dims.statuses[2].name, "Closed");
        assert_eq!(dims.statuses[2].id, 3);
        assert_eq!(dims.priorities[3].name, "Urgent");
        assert_eq!(dims.channels[0].name, "Email");
    }

    #[test]
    fn test_entity_pools_have_dense_ids() {
        let mut rng = StdRng::seed_from_u64(2);
        let dims = seed_dimensions(&mut rng, &AppConfig::default());

        assert_eq!(dims.customers.len(), 50);
        assert_eq!(dims.agents.len(), 10);
        for (i, c) in dims.customers.iter().enumerate() {
            assert_eq!(c.id, i as i64 + 1);
            assert!(!c.name.is_empty());
            assert!(c.email.contains('@'));
        }
        for (i, a) in dims.agents.iter().enumerate() {
            assert_eq!(a.id, i as i64 + 1);
            assert!(!a.full_name.is_empty());
            assert!(TEAMS.contains(&a.team.as_str()));
        }
    }

    #[test]
    fn test_custom_pool_sizes() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = AppConfig {
            customer_count: 7,
            agent_count: 2,
            ..AppConfig::default()
        };
        let dims = seed_dimensions(&mut rng, &config);
        assert_eq!(dims.customers.len(), 7);
        assert_eq!(dims.agents.len(), 2);
    }

    #[test]
    fn test_same_seed_same_pools() {
        let a = seed_agents(&mut StdRng::seed_from_u64(42), 10);
        let b = seed_agents(&mut StdRng::seed_from_u64(42), 10);
        assert_eq!(a, b);
    }
}
