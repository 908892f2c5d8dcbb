//! Background calculations.

use pi_digits::Algorithm;
use pi_digits::CalculationRequest;
use pi_digits::Calculator;
use pi_digits::ChannelObserver;
use pi_digits::Event;
use pi_digits::Worker;
use pi_digits::PI_REFERENCE;

#[test]
fn worker_reports_through_channel() {
    let (obs, rx) = ChannelObserver::new();
    let req = CalculationRequest::new(Algorithm::CrossValidation, 60).unwrap();
    let w = Worker::spawn(Calculator::default(), req, obs).unwrap();

    let mut last = 0.0;
    let mut partial = 0;
    let mut completed = None;
    for event in rx.iter() {
        match event {
            Event::Progress(f) => {
                assert!(f >= last);
                last = f;
            }
            Event::Digits(_) => partial += 1,
            Event::Complete(v) => completed = Some(v),
            Event::Error(e) => panic!("unexpected error {e}"),
        }
    }

    let r = w.join().unwrap();
    assert_eq!(last, 1.0);
    assert!(partial > 0);
    assert_eq!(completed.as_deref(), Some(&PI_REFERENCE[..62]));
    assert_eq!(r.value, &PI_REFERENCE[..62]);
    assert!(r.cross_validated);
}

#[test]
fn worker_stop_is_idempotent() {
    let (obs, rx) = ChannelObserver::new();
    let req = CalculationRequest::new(Algorithm::CrossValidation, 1000).unwrap();
    let w = Worker::spawn(Calculator::default(), req, obs).unwrap();

    // wait until the calculation runs
    assert!(matches!(rx.recv(), Ok(Event::Progress(_))));

    assert!(!w.stop());
    assert!(w.stop());
    assert!(w.stop_flag().is_stopped());

    let r = w.join();
    let events: Vec<Event> = rx.try_iter().collect();

    // the calculation may have passed its last stop check already
    match r {
        None => assert!(events.iter().all(|e| matches!(e, Event::Progress(_) | Event::Digits(_)))),
        Some(r) => assert!(events.contains(&Event::Complete(r.value))),
    }
}
