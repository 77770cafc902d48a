use approx::{assert_abs_diff_eq, assert_relative_eq};
use integration_tests::{FRAME, max_energy_drift, released, run_for};
use pendulum_core::{Observer, PendulumState, PhysicalParameters};
use pendulum_observers::{History, PeriodEstimator};
use pendulum_sim::{RunState, Simulation, SimulationError, Tick};
use pendulum_solvers::{
    Scheme,
    advance::{Action, Event},
};

#[test]
fn rk4_conserves_energy_over_a_period() {
    for dt in [0.001, 0.005, 0.01] {
        let params = PhysicalParameters::default().time_step_si(dt);
        let mut sim = released(params, Scheme::RungeKutta4, 0.8);
        let initial = sim.current_energy().total;

        let period = sim.analytic_period();
        run_for(&mut sim, period);

        assert!(
            max_energy_drift(&sim, initial) < 0.01,
            "drift too large at dt = {dt}"
        );
    }
}

#[test]
fn euler_energy_wanders_more_than_rk4() {
    let params = PhysicalParameters::default().time_step_si(0.02);

    let mut euler = released(params, Scheme::SemiImplicitEuler, 1.0);
    let mut rk4 = released(params, Scheme::RungeKutta4, 1.0);
    let initial = euler.current_energy().total;

    run_for(&mut euler, 6.0);
    run_for(&mut rk4, 6.0);

    let euler_drift = max_energy_drift(&euler, initial);
    let rk4_drift = max_energy_drift(&rk4, initial);
    assert!(euler_drift > 10.0 * rk4_drift);

    // Semi-implicit Euler stays bounded rather than spiralling outward.
    assert!(euler_drift < 0.25);
}

#[test]
fn damped_swing_settles() {
    let params = PhysicalParameters::default().damping_si(0.5);
    let mut sim = released(params, Scheme::RungeKutta4, 1.0);
    let initial = sim.current_energy().total;

    run_for(&mut sim, 20.0);

    let totals: Vec<f64> = sim.history().iter().map(|p| p.total).collect();
    assert!(totals.windows(2).all(|w| w[1] <= w[0] + 1e-9));
    assert!(sim.current_energy().total < 0.01 * initial);
}

fn energy_rises(sim: &Simulation) -> usize {
    let totals: Vec<f64> = sim.history().iter().map(|p| p.total).collect();
    totals.windows(2).filter(|w| w[1] > w[0] + 1e-9).count()
}

#[test]
fn light_damping_is_monotone_only_with_rk4() {
    let params = PhysicalParameters::default().damping_si(0.01);

    let mut euler = released(params, Scheme::SemiImplicitEuler, 1.0);
    let mut rk4 = released(params, Scheme::RungeKutta4, 1.0);
    let initial = euler.current_energy().total;

    run_for(&mut euler, 5.0);
    run_for(&mut rk4, 5.0);

    // Euler's step-sized energy oscillation outweighs the weak drag.
    assert!(energy_rises(&euler) > 0);
    assert_eq!(energy_rises(&rk4), 0);

    // Both still lose energy overall.
    assert!(euler.current_energy().total < initial);
    assert!(rk4.current_energy().total < initial);
}

#[test]
fn small_swing_matches_analytic_period() {
    let mut sim = released(PhysicalParameters::default(), Scheme::RungeKutta4, 0.1);
    assert_abs_diff_eq!(sim.analytic_period(), 2.006, epsilon = 0.001);

    run_for(&mut sim, 20.0);

    let measured = sim.measured_period().expect("several swings completed");
    assert_abs_diff_eq!(measured, sim.analytic_period(), epsilon = 0.02);
}

#[test]
fn wide_swing_is_slower_than_small_angle_formula() {
    let mut sim = released(PhysicalParameters::default(), Scheme::RungeKutta4, 1.5);
    run_for(&mut sim, 20.0);

    let measured = sim.measured_period().expect("several swings completed");
    assert!(measured > 1.1 * sim.analytic_period());
}

#[test]
fn schemes_agree_on_period_at_small_steps() {
    let params = PhysicalParameters::default().time_step_si(0.001);
    let mut euler = released(params, Scheme::SemiImplicitEuler, 0.3);
    let mut rk4 = released(params, Scheme::RungeKutta4, 0.3);

    run_for(&mut euler, 15.0);
    run_for(&mut rk4, 15.0);

    let euler_period = euler.measured_period().expect("euler measured");
    let rk4_period = rk4.measured_period().expect("rk4 measured");
    assert_abs_diff_eq!(euler_period, rk4_period, epsilon = 0.02);
}

#[test]
fn zero_gravity_pendulum_stays_put() {
    let params = PhysicalParameters::default().gravity_si(0.0);
    let mut sim = released(params, Scheme::RungeKutta4, 0.7);

    run_for(&mut sim, 2.0);

    let state = sim.current_state();
    assert_eq!(state.angle, 0.7);
    assert_eq!(state.angular_velocity, 0.0);
    assert_eq!(sim.current_energy().total, 0.0);
    assert_eq!(sim.measured_period(), None);
    assert!(sim.analytic_period().is_finite());
}

#[test]
fn drive_excites_a_pendulum_at_rest() {
    let params = PhysicalParameters::default().drive_si(1.0, 3.0);
    let mut sim = released(params, Scheme::RungeKutta4, 0.0);

    run_for(&mut sim, 2.0);

    assert!(sim.current_energy().total > 0.0);
    assert!(sim.history().iter().any(|p| p.angle.abs() > 0.01));
}

#[test]
fn time_scale_slows_the_clock() {
    let params = PhysicalParameters::default().time_scale(0.25);
    let mut sim = released(params, Scheme::RungeKutta4, 0.5);

    run_for(&mut sim, 2.0);

    assert_relative_eq!(sim.current_state().time, 0.5, epsilon = 1e-9);
}

#[test]
fn sub_steps_land_on_the_interval() {
    let dt = 0.005;
    let params = PhysicalParameters::default().time_step_si(dt);
    let mut sim = released(params, Scheme::SemiImplicitEuler, 0.5);

    let tick = sim.tick(2.5 * dt).expect("tick succeeds");

    assert_eq!(
        tick,
        Tick::Advanced {
            steps: 3,
            crossing: None
        }
    );
    assert_eq!(sim.current_state().time, 2.5 * dt);
}

#[test]
fn reset_is_idempotent_after_a_long_run() {
    let mut sim = released(PhysicalParameters::default(), Scheme::RungeKutta4, 0.6);
    run_for(&mut sim, 10.0);
    sim.set_scheme(Scheme::SemiImplicitEuler);
    run_for(&mut sim, 2.0);

    sim.reset();
    let first = (
        sim.current_state(),
        sim.current_energy(),
        sim.history().len(),
        sim.measured_period(),
        sim.run_state(),
    );
    sim.reset();
    let second = (
        sim.current_state(),
        sim.current_energy(),
        sim.history().len(),
        sim.measured_period(),
        sim.run_state(),
    );

    assert_eq!(first, second);
    assert_eq!(first.0, PendulumState::at_rest(0.6));
    assert_eq!(first.4, RunState::Stopped);
}

#[test]
fn history_keeps_the_most_recent_window() {
    let mut sim = released(PhysicalParameters::default(), Scheme::RungeKutta4, 0.5);
    let capacity = sim.history().capacity();

    #[allow(clippy::cast_precision_loss)]
    let seconds = (capacity + 200) as f64 * FRAME;
    run_for(&mut sim, seconds);

    let history = sim.history();
    assert_eq!(history.len(), capacity);
    assert!(history.iter().zip(history.iter().skip(1)).all(|(a, b)| a.time < b.time));
    assert_eq!(
        history.latest().map(|p| p.state()),
        Some(sim.current_state())
    );
}

#[test]
fn recovers_after_divergence() {
    let mut sim = released(PhysicalParameters::default(), Scheme::RungeKutta4, 0.5);
    run_for(&mut sim, 0.5);

    let blow_up = PhysicalParameters::default()
        .mass_si(1e-6)
        .length_si(1e-6)
        .drive_si(1e300, 1.0);
    sim.configure(blow_up).expect("finite parameters are accepted");

    let before = sim.current_state();
    assert!(matches!(
        sim.tick(FRAME),
        Err(SimulationError::Diverged { .. })
    ));
    assert_eq!(sim.current_state(), before);
    assert_eq!(sim.run_state(), RunState::Stopped);

    sim.configure(PhysicalParameters::default())
        .expect("defaults are valid");
    sim.start();
    run_for(&mut sim, 0.5);
    assert!(sim.current_state().is_finite());
    assert!(sim.current_state().time > before.time);
}

#[test]
fn sub_step_observers_agree_with_the_clock() {
    let mut sim = released(PhysicalParameters::default(), Scheme::RungeKutta4, 0.3);
    let mut estimator = PeriodEstimator::new();
    let mut steps: History<Event> = History::new(10);

    for _ in 0..(12 * 60) {
        sim.tick_with(FRAME, |event: &Event| -> Option<Action> {
            let _: Option<Action> = estimator.observe(event);
            steps.observe(event)
        })
        .expect("tick succeeds");
    }

    // Sampling every sub-step pins crossings more tightly than once per
    // frame, so both estimates agree to within a frame spread over the window.
    let per_step = estimator.measured_period().expect("sub-steps measured");
    let per_frame = sim.measured_period().expect("frames measured");
    assert_abs_diff_eq!(per_step, per_frame, epsilon = FRAME);
    assert_abs_diff_eq!(per_step, sim.analytic_period(), epsilon = 0.02);

    assert_eq!(steps.len(), 10);
    assert_eq!(
        steps.latest().map(|event| event.state),
        Some(sim.current_state())
    );
}

#[test]
fn independent_simulations_do_not_interact() {
    let mut a = Simulation::default();
    let b = Simulation::default();

    a.start();
    run_for(&mut a, 1.0);

    assert_eq!(b.current_state().time, 0.0);
    assert!(b.history().is_empty());
}
