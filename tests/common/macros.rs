/// Asserts that a cell holds roughly the given amount of a compound.
#[macro_export]
macro_rules! assert_compound_near {
    ($world:expr, $entity:expr, $compound:expr, $expected:expr) => {
        let amount = {
            use protoplasm_lib::model::CompoundPool;
            $world
                .ecs
                .get::<&protoplasm_data::CompoundBag>($entity)
                .expect("Cell has no compound bag")
                .amount_of($compound)
        };
        assert!(
            (amount - $expected).abs() < 1e-4,
            "{:?} amount {} is not near {}",
            $compound,
            amount,
            $expected
        );
    };
}

/// Asserts that every budget in the world is back to zero.
#[macro_export]
macro_rules! assert_budgets_cleared {
    ($world:expr) => {
        for (entity, budget) in $world.ecs.query::<&protoplasm_data::EnergyBudget>().iter() {
            assert_eq!(
                *budget,
                protoplasm_data::EnergyBudget::default(),
                "Budget of {:?} was not reset",
                entity
            );
        }
    };
}

/// Asserts a cell's current health.
#[macro_export]
macro_rules! assert_health_near {
    ($world:expr, $entity:expr, $expected:expr) => {
        let health = $world
            .ecs
            .get::<&protoplasm_data::Health>($entity)
            .expect("Cell has no health")
            .current_health;
        assert!(
            (health - $expected).abs() < 1e-3,
            "Health {} is not near {}",
            health,
            $expected
        );
    };
}
