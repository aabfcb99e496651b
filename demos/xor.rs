use std::sync::mpsc;
use std::thread;

use lookahead_nn::{
    ActivationFunction, CostFunction, EpochStats, Example, Network, Sgd, TrainConfig, train_loop,
};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> lookahead_nn::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut network: Network = Network::new(
        &[2, 4, 1],
        ActivationFunction::Sigmoid,
        CostFunction::CrossEntropy,
        &mut rng,
    )?;

    let mut data = vec![
        Example::new(vec![1.0, 0.0], vec![1.0]),
        Example::new(vec![1.0, 1.0], vec![0.0]),
        Example::new(vec![0.0, 1.0], vec![1.0]),
        Example::new(vec![0.0, 0.0], vec![0.0]),
    ];

    let (tx, rx) = mpsc::channel::<EpochStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            if stats.epoch % 1000 == 0 {
                println!("Epoch {}: cost = {:.6}", stats.epoch, stats.train_cost);
            }
        }
    });

    let optimizer = Sgd::new(0.5).momentum(0.5);
    let mut config = TrainConfig::new(10000, 4, optimizer).seed(7);
    config.progress_tx = Some(tx);

    let summary = train_loop(&mut network, &mut data, &config)?;
    drop(config);
    let _ = printer.join();

    println!("Trained {} epochs, final cost {:.6}", summary.epochs_completed, summary.final_cost);
    for example in &data {
        println!("Input: {:?} -> Output: {:.4}", example.input, network.feedforward(&example.input)?[0]);
    }
    Ok(())
}
