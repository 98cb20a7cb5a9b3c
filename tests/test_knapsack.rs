use knapsack_ga::{
    breeding::{next_generation, Crossover, MutationRate},
    chromosome::{init_population, Chromosome},
    evolution::{
        run_single, EvolutionLauncher, Experiment, Params, RunResult, RunSettings, StopReason,
    },
    fitness::{is_feasible, repair_solution, ConstraintConfig, Evaluator},
    instance::{build_item_arrays, Instance, Item},
    rng::RandomNumberGenerator,
    selection::{elite_indices, SelectionConfig},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn three_items() -> Instance {
    Instance::new(
        10.0,
        vec![
            Item::new(1, 5.0, 10.0),
            Item::new(2, 4.0, 8.0),
            Item::new(3, 3.0, 6.0),
        ],
    )
}

fn scenario_params() -> Params {
    Params::builder()
        .population(4)
        .pc(0.9)
        .pm(MutationRate::Fixed(0.1))
        .elitism(1)
        .selection(SelectionConfig::tournament(2))
        .crossover(Crossover::OnePoint)
        .constraint(ConstraintConfig::repair())
        .max_generations(20)
        .build()
        .unwrap()
}

fn without_timing(mut result: RunResult) -> String {
    result.time_sec = 0.0;
    serde_json::to_string(&result).unwrap()
}

fn larger_instance(n: usize) -> Instance {
    let items = (0..n)
        .map(|i| {
            let weight = 1.0 + ((i * 37) % 23) as f64;
            let value = 1.0 + ((i * 53) % 31) as f64;
            Item::new(i as i64, weight, value)
        })
        .collect::<Vec<_>>();
    let total: f64 = items.iter().map(|item| item.weight).sum();
    Instance::new(total * 0.4, items)
}

#[test]
fn test_three_item_scenario() {
    init_tracing();
    let instance = three_items();
    let params = scenario_params();
    let settings = RunSettings::default().with_log_every(5);

    let result = run_single(&instance, &params, 0, &settings, 0).unwrap();
    assert!(result.feasible);
    assert_eq!(result.best_value, 18.0);
    assert_eq!(result.best_weight, 9.0);
    assert_eq!(result.best_bits, "110");
    assert_eq!(result.best_fitness, 18.0);
    assert_eq!(result.stopped_reason, StopReason::MaxGenerations);
    assert_eq!(result.gen_reached, 20);
}

#[test]
fn test_penalty_scenario_score() {
    let evaluator = Evaluator::new(&three_items(), ConstraintConfig::penalty(100.0));
    let all_in = Chromosome::from_bit_string("111").unwrap();
    let evaluated = evaluator.evaluate(vec![all_in.clone()]);

    assert_eq!(evaluated.weights[0], 12.0);
    assert_eq!(evaluated.values[0], 24.0);
    assert_eq!(evaluated.fitness[0], -176.0);
    assert_eq!(evaluated.population[0], all_in);
}

#[test]
fn test_same_seed_same_result() {
    let instance = larger_instance(40);
    let params = Params::builder()
        .population(16)
        .elitism(2)
        .max_generations(30)
        .build()
        .unwrap();
    let settings = RunSettings::default().with_log_every(0);

    let a = run_single(&instance, &params, 123, &settings, 0).unwrap();
    let b = run_single(&instance, &params, 123, &settings, 0).unwrap();

    assert_eq!(without_timing(a), without_timing(b));
}

#[test]
fn test_parallel_evaluation_matches_sequential() {
    let instance = larger_instance(25);
    let params = Params::builder()
        .population(20)
        .max_generations(15)
        .build()
        .unwrap();
    let sequential = RunSettings::default().with_log_every(0);
    let parallel = sequential.clone().with_parallel_threshold(1);

    let a = run_single(&instance, &params, 9, &sequential, 0).unwrap();
    let b = run_single(&instance, &params, 9, &parallel, 0).unwrap();
    assert_eq!(a.best_bits, b.best_bits);
    assert_eq!(a.trace_avg_fitness, b.trace_avg_fitness);
}

#[test]
fn test_repair_runs_are_always_feasible() {
    let instance = larger_instance(60);
    let params = Params::builder()
        .population(30)
        .max_generations(40)
        .build()
        .unwrap();
    let experiment = Experiment::new(params, RunSettings::default().with_log_every(0)).unwrap();

    for result in experiment.run_instance(&instance).unwrap() {
        assert!(result.feasible);
        assert!(result.best_weight <= instance.capacity);
    }
}

#[test]
fn test_repaired_population_is_feasible_and_stable() {
    let instance = larger_instance(50);
    let arrays = build_item_arrays(&instance);
    let mut rng = RandomNumberGenerator::from_seed(77);
    let population = init_population(40, 50, &mut rng);

    let evaluated = Evaluator::new(&instance, ConstraintConfig::repair()).evaluate(population);
    for chromosome in &evaluated.population {
        assert!(is_feasible(chromosome, &arrays.weights, instance.capacity));
        assert_eq!(&repair_solution(chromosome, &arrays, instance.capacity), chromosome);
    }
}

#[test]
fn test_elites_survive_every_transition() {
    let instance = larger_instance(30);
    let params = Params::builder()
        .population(12)
        .elitism(3)
        .constraint(ConstraintConfig::penalty(5.0))
        .build()
        .unwrap();
    let evaluator = Evaluator::new(&instance, params.constraint);
    let mut rng = RandomNumberGenerator::from_seed(31);
    let mut current = evaluator.evaluate(init_population(12, 30, &mut rng));

    for _ in 0..10 {
        let elites: Vec<Chromosome> = elite_indices(&current.fitness, 3)
            .into_iter()
            .map(|i| current.population[i].clone())
            .collect();

        let next = next_generation(&current, &params, &mut rng).unwrap();
        assert_eq!(next.len(), 12);
        for elite in &elites {
            assert!(next.contains(elite));
        }
        current = evaluator.evaluate(next);
    }
}

#[test]
fn test_penalty_mode_best_fitness_accounts_for_overweight() {
    let instance = larger_instance(20);
    let params = Params::builder()
        .population(10)
        .max_generations(10)
        .constraint(ConstraintConfig::penalty(3.0))
        .build()
        .unwrap();
    let launcher =
        EvolutionLauncher::new(&instance, params, RunSettings::default().with_log_every(0)).unwrap();
    let result = launcher.run(5, 0).unwrap();

    let overweight = (result.best_weight - instance.capacity).max(0.0);
    let expected = result.best_value - 3.0 * overweight;
    assert!((result.best_fitness - expected).abs() < 1e-9);
}

#[test]
fn test_run_index_and_seed_recorded() {
    let params = Params::builder()
        .population(4)
        .max_generations(3)
        .runs(3)
        .seeds(vec![11])
        .build()
        .unwrap();
    let experiment = Experiment::new(params, RunSettings::default().with_log_every(0)).unwrap();
    let results = experiment.run_instance_parallel(&three_items()).unwrap();

    let pairs: Vec<(usize, u64)> = results.iter().map(|r| (r.run_index, r.seed)).collect();
    assert_eq!(pairs, vec![(0, 11), (1, 1), (2, 2)]);
}
