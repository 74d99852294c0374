//! Physical properties every converged equilibrium must satisfy.

use nse_core::StatePoint;
use nse_solver::{
    EquilibriumSolver, GuessStrategy, JacobianMethod, NewtonConfig, check_mass_fractions,
    nse_relation_residual, solve_equilibrium,
};

const RHO: f64 = 1.0e11;

#[test]
fn symmetric_matter_at_three_mev() {
    let x = solve_equilibrium(RHO, 3.0, 0.5).unwrap();

    // Reference values for ρ = 1e11 g/cm³, T = 3 MeV, Y_p = 0.5
    let reference = (0.301_470_354_484_956_8, 0.301_470_354_484_956_8, 0.397_059_291_030_172_8);
    assert!((x.proton / reference.0 - 1.0).abs() < 1e-3);
    assert!((x.neutron / reference.1 - 1.0).abs() < 1e-3);
    assert!((x.alpha / reference.2 - 1.0).abs() < 1e-3);

    assert!((x.proton - x.neutron).abs() < 1e-9);
    assert!(x.alpha > 0.0);
}

#[test]
fn mass_and_charge_are_conserved() {
    for &(t, yp) in &[(0.5, 0.25), (1.0, 0.1), (2.0, 0.45), (3.0, 0.5), (5.0, 0.7), (10.0, 0.9)] {
        let x = solve_equilibrium(RHO, t, yp).unwrap();
        assert!((x.total() - 1.0).abs() < 1e-6, "T={t} Yp={yp}: sum {}", x.total());
        assert!(
            (x.charge_fraction() - yp).abs() < 1e-6,
            "T={t} Yp={yp}: charge {}",
            x.charge_fraction()
        );
    }
}

#[test]
fn nse_relation_holds_on_returned_fractions() {
    for &(t, yp) in &[(1.0, 0.25), (3.0, 0.5), (3.0, 0.001), (6.0, 0.8)] {
        let state = StatePoint::new(RHO, t, yp).unwrap();
        let x = solve_equilibrium(RHO, t, yp).unwrap();
        let residual = nse_relation_residual(&x, &state).unwrap();
        assert!(residual.abs() < 1e-6, "T={t} Yp={yp}: μ_α mismatch {residual}");
    }
}

#[test]
fn alphas_dissociate_as_temperature_rises() {
    let mut previous = f64::INFINITY;
    for step in 0..=9 {
        let t = 1.0 + step as f64;
        let x = solve_equilibrium(RHO, t, 0.25).unwrap();
        assert!(
            x.alpha < previous,
            "X_alpha did not decrease at T={t}: {} >= {}",
            x.alpha,
            previous
        );
        previous = x.alpha;
    }
    assert!(previous < 1e-3);
}

#[test]
fn mirror_states_swap_free_nucleons() {
    for &t in &[1.0, 3.0, 6.0] {
        for &yp in &[0.1, 0.25, 0.3, 0.45] {
            let x = solve_equilibrium(RHO, t, yp).unwrap();
            let m = solve_equilibrium(RHO, t, 1.0 - yp).unwrap();
            assert!((x.proton - m.neutron).abs() < 1e-8, "T={t} Yp={yp}");
            assert!((x.neutron - m.proton).abs() < 1e-8, "T={t} Yp={yp}");
            assert!((x.alpha - m.alpha).abs() < 1e-8, "T={t} Yp={yp}");
        }
    }
}

#[test]
fn extreme_proton_fractions_converge() {
    let neutron_rich = solve_equilibrium(RHO, 3.0, 0.001).unwrap();
    assert!(neutron_rich.proton < 2e-3);
    assert!(neutron_rich.neutron > 0.99);

    let proton_rich = solve_equilibrium(RHO, 3.0, 0.999).unwrap();
    assert!(proton_rich.neutron < 2e-3);
    assert!(proton_rich.proton > 0.99);
}

#[test]
fn cold_dense_matter_is_mostly_alphas() {
    let solver = EquilibriumSolver::default();
    let state = StatePoint::new(RHO, 1.0, 0.25).unwrap();
    let solution = solver.solve(&state).unwrap();

    assert_eq!(solution.strategy, Some(GuessStrategy::AlphaDominant));
    // Y_p = 0.25: all protons bound, half the mass in alphas
    assert!((solution.mass_fractions.alpha - 0.5).abs() < 1e-3);
    assert!(solution.mass_fractions.proton < 1e-4);
}

#[test]
fn cold_matter_below_half_an_mev_converges() {
    let solver = EquilibriumSolver::default();
    for t in [0.1, 0.2, 0.3] {
        for yp in [0.25, 0.5] {
            let state = StatePoint::new(RHO, t, yp).unwrap();
            let solution = solver
                .solve(&state)
                .unwrap_or_else(|e| panic!("T={t} Yp={yp}: {e}"));
            let x = solution.mass_fractions;

            assert_eq!(solution.strategy, Some(GuessStrategy::AlphaDominant));
            assert!((x.total() - 1.0).abs() < 1e-6, "T={t} Yp={yp}: sum {}", x.total());
            assert!((x.charge_fraction() - yp).abs() < 1e-6, "T={t} Yp={yp}");
            // Every proton ends up bound: X_α = 2·Y_p
            assert!((x.alpha - 2.0 * yp).abs() < 1e-6, "T={t} Yp={yp}: X_alpha {}", x.alpha);
            assert!(x.proton < 1e-10);
        }
    }
}

#[test]
fn both_strategies_reach_the_same_root() {
    let solver = EquilibriumSolver::default();
    let state = StatePoint::new(RHO, 2.0, 0.4).unwrap();
    let free = solver.solve_with_strategy(&state, GuessStrategy::FreeNucleon).unwrap();
    let bound = solver.solve_with_strategy(&state, GuessStrategy::AlphaDominant).unwrap();
    assert!((free.mass_fractions.alpha - bound.mass_fractions.alpha).abs() < 1e-8);
    assert!((free.mass_fractions.proton - bound.mass_fractions.proton).abs() < 1e-8);
}

#[test]
fn finite_difference_jacobians_agree_with_analytic() {
    let state = StatePoint::new(RHO, 3.0, 0.5).unwrap();
    let analytic = EquilibriumSolver::default().solve(&state).unwrap();

    for method in [JacobianMethod::ForwardDifference, JacobianMethod::CentralDifference] {
        let solver = EquilibriumSolver::new(NewtonConfig {
            jacobian: method,
            ..NewtonConfig::default()
        })
        .unwrap();
        let solution = solver.solve(&state).unwrap();
        assert!(
            (solution.mass_fractions.alpha - analytic.mass_fractions.alpha).abs() < 1e-8,
            "{method:?}"
        );
    }
}

#[test]
fn returned_solution_passes_validation() {
    let state = StatePoint::new(5.0e9, 1.5, 0.35).unwrap();
    let solution = EquilibriumSolver::default().solve(&state).unwrap();
    let report = check_mass_fractions(&solution.mass_fractions, &state, 1e-8).unwrap();
    assert!(report.conservation_residual < 1e-8);
    assert!(solution.residual_norm < 1e-10);
    assert_eq!(solution.state, state);
}

#[test]
fn solver_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EquilibriumSolver>();

    let solver = EquilibriumSolver::default();
    std::thread::scope(|scope| {
        let handles: Vec<_> = [0.2, 0.4, 0.6, 0.8]
            .into_iter()
            .map(|yp| {
                let solver = &solver;
                scope.spawn(move || {
                    let state = StatePoint::new(RHO, 3.0, yp).unwrap();
                    solver.solve(&state).map(|s| s.mass_fractions)
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    });
}
