use dmxp_opring::OpRing::Structs::RESULT_EXECUTOR_PANIC;
use dmxp_opring::{
    CompletionRecord, Operation, OperationKind, RingError, RingSystem, RingSystemBuilder,
};
use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const WAIT: Option<Duration> = Some(Duration::from_secs(5));

fn immediate(op: &Operation) -> i64 {
    op.payload.len() as i64
}

/// Spin until `flag` is set; used to hold a worker inside an operation.
fn wait_for(flag: &AtomicBool) {
    while !flag.load(Ordering::Acquire) {
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn capacity_four_two_workers_scenario() {
    let ring: RingSystem = RingSystem::create(4, 4, 2, immediate).unwrap();

    for tag in 1..=4 {
        ring.submit(Operation::nop(), tag).unwrap();
    }
    assert_eq!(ring.submit(Operation::nop(), 5), Err(RingError::RingFull));

    let first = ring.wait_completion(WAIT).unwrap();
    ring.submit(Operation::nop(), 5).unwrap();
    // exactly one slot was freed
    assert_eq!(ring.submit(Operation::nop(), 6), Err(RingError::RingFull));

    let mut tags = vec![first.submitter_tag];
    for _ in 0..4 {
        tags.push(ring.wait_completion(WAIT).unwrap().submitter_tag);
    }
    tags.sort_unstable();
    assert_eq!(tags, vec![1, 2, 3, 4, 5]);

    assert_eq!(
        ring.wait_completion(Some(Duration::from_millis(20))),
        Err(RingError::TimedOut)
    );
}

#[test]
fn backpressure_holds_while_completions_are_undrained() {
    let capacity = 8;
    let ring: RingSystem = RingSystem::create(capacity, capacity * 2, 3, immediate).unwrap();

    for tag in 0..capacity as u64 {
        ring.submit(Operation::nop(), tag).unwrap();
    }
    // Workers may finish everything, but nothing was consumed yet.
    for _ in 0..10 {
        assert_eq!(ring.submit(Operation::nop(), 99), Err(RingError::RingFull));
    }
    assert_eq!(ring.in_flight(), capacity);

    ring.wait_completion(WAIT).unwrap();
    assert!(ring.submit(Operation::nop(), 100).is_ok());
    assert_eq!(ring.submit(Operation::nop(), 101), Err(RingError::RingFull));

    let stats = ring.stats();
    assert_eq!(stats.submitted, capacity as u64 + 1);
    assert_eq!(stats.rejected, 11);
}

#[test]
fn submissions_are_claimed_in_fifo_order() {
    let release = Arc::new(AtomicBool::new(false));
    let claimed = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let ring: RingSystem<u64> = {
        let release = Arc::clone(&release);
        let claimed = Arc::clone(&claimed);
        RingSystem::create(16, 16, 1, move |tag: &u64| {
            claimed.lock().push(*tag);
            if *tag == 0 {
                wait_for(&release);
            }
            0
        })
        .unwrap()
    };

    // Tag 0 parks the only worker; the rest queue up behind it.
    for tag in 0..10u64 {
        ring.submit(tag, tag).unwrap();
    }
    release.store(true, Ordering::Release);

    for _ in 0..10 {
        ring.wait_completion(WAIT).unwrap();
    }
    assert_eq!(*claimed.lock(), (0..10).collect::<Vec<u64>>());
}

#[test]
fn completions_follow_finish_order_not_submit_order() {
    let release = Arc::new(AtomicBool::new(false));
    let ring: RingSystem = {
        let release = Arc::clone(&release);
        RingSystem::create(4, 4, 2, move |op: &Operation| {
            if op.kind == OperationKind::Read {
                wait_for(&release);
            }
            0
        })
        .unwrap()
    };

    ring.submit(Operation::new(OperationKind::Read, vec![0u8; 4]), 1).unwrap();
    ring.submit(Operation::nop(), 2).unwrap();

    // The slow operation holds one worker, the other finishes tag 2.
    let first = ring.wait_completion(WAIT).unwrap();
    assert_eq!(first.submitter_tag, 2);

    release.store(true, Ordering::Release);
    let second = ring.wait_completion(WAIT).unwrap();
    assert_eq!(second.submitter_tag, 1);
}

#[test]
fn result_codes_pass_through_unchanged() {
    let ring: RingSystem = RingSystem::create(8, 8, 2, |op: &Operation| match op.kind {
        OperationKind::Write => op.payload.len() as i64,
        OperationKind::Custom(code) => -(code as i64),
        _ => 0,
    })
    .unwrap();

    ring.submit(Operation::new(OperationKind::Write, b"hello".to_vec()), 10).unwrap();
    ring.submit(Operation::new(OperationKind::Custom(2), Vec::new()), 20).unwrap();

    let mut records: Vec<CompletionRecord> = (0..2).map(|_| ring.wait_completion(WAIT).unwrap()).collect();
    records.sort_by_key(|r| r.submitter_tag);

    assert_eq!(records[0], CompletionRecord { submitter_tag: 10, result_code: 5 });
    assert!(!records[0].is_error());
    assert_eq!(records[1], CompletionRecord { submitter_tag: 20, result_code: -2 });
    assert!(records[1].is_error());
}

#[test]
fn panicking_executor_reports_eio_and_worker_survives() {
    let ring: RingSystem = RingSystem::create(4, 4, 1, |op: &Operation| {
        if op.kind == OperationKind::Fsync {
            panic!("disk on fire");
        }
        1
    })
    .unwrap();

    ring.submit(Operation::new(OperationKind::Fsync, Vec::new()), 1).unwrap();
    let failed = ring.wait_completion(WAIT).unwrap();
    assert_eq!(failed.submitter_tag, 1);
    assert_eq!(failed.result_code, RESULT_EXECUTOR_PANIC);

    // The single worker is still alive.
    ring.submit(Operation::nop(), 2).unwrap();
    let ok = ring.wait_completion(WAIT).unwrap();
    assert_eq!(ok, CompletionRecord { submitter_tag: 2, result_code: 1 });
}

#[test]
fn wait_times_out_on_idle_system() {
    let ring: RingSystem = RingSystem::create(4, 4, 1, immediate).unwrap();

    let start = Instant::now();
    let err = ring.wait_completion(Some(Duration::from_millis(50))).unwrap_err();
    assert_eq!(err, RingError::TimedOut);
    assert!(err.is_recoverable());
    assert!(start.elapsed() >= Duration::from_millis(50));

    // Zero timeout is a non-blocking poll.
    assert_eq!(
        ring.wait_completion(Some(Duration::ZERO)),
        Err(RingError::TimedOut)
    );
}

#[test]
fn blocked_waiter_is_woken_by_completion() {
    let ring: Arc<RingSystem> = Arc::new(RingSystem::create(4, 4, 1, immediate).unwrap());

    let waiter = {
        let ring = Arc::clone(&ring);
        thread::spawn(move || ring.wait_completion(None))
    };
    thread::sleep(Duration::from_millis(30));
    ring.submit(Operation::new(OperationKind::Write, vec![1, 2, 3]), 77).unwrap();

    let record = waiter.join().unwrap().unwrap();
    assert_eq!(record, CompletionRecord { submitter_tag: 77, result_code: 3 });
}

#[test]
fn batch_submission_is_all_or_nothing() {
    let ring: RingSystem = RingSystem::create(4, 8, 2, immediate).unwrap();

    let batch = (0..3u64).map(|tag| (Operation::nop(), tag));
    assert_eq!(ring.submit_batch(batch), Ok(3));

    // Only one slot of budget left; a batch of two must not half-land.
    let batch = (3..5u64).map(|tag| (Operation::nop(), tag));
    assert_eq!(ring.submit_batch(batch), Err(RingError::RingFull));
    assert_eq!(ring.in_flight(), 3);
    // every entry of the refused batch counts
    assert_eq!(ring.stats().rejected, 2);

    assert_eq!(ring.submit_batch(Vec::new()), Ok(0));
    assert_eq!(ring.submit_batch(vec![(Operation::nop(), 3)]), Ok(1));

    let tags: HashSet<u64> = (0..4)
        .map(|_| ring.wait_completion(WAIT).unwrap().submitter_tag)
        .collect();
    assert_eq!(tags, (0..4).collect());
}

#[test]
fn quiescence_after_everything_is_drained() {
    let ring: RingSystem = RingSystemBuilder::new()
        .with_submission_capacity(8)
        .with_completion_capacity(16)
        .with_workers(4)
        .with_thread_name("quiesce")
        .build(immediate)
        .unwrap();

    let total = 200u64;
    let mut seen = HashSet::new();
    let mut next = 0u64;
    while seen.len() < total as usize {
        while next < total {
            match ring.submit(Operation::nop(), next) {
                Ok(()) => next += 1,
                Err(RingError::RingFull) => break,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        let record = ring.wait_completion(WAIT).unwrap();
        assert!(seen.insert(record.submitter_tag), "duplicate completion");
        assert!(ring.in_flight() <= ring.submission_capacity());
    }

    assert_eq!(ring.submission_used(), 0);
    assert_eq!(ring.completion_used(), 0);
    assert_eq!(ring.in_flight(), 0);

    let stats = ring.stats();
    assert_eq!(stats.submitted, total);
    assert_eq!(stats.executed, total);
    assert_eq!(stats.consumed, total);
    assert_eq!(stats.outstanding(), 0);
}

#[test]
fn generic_operation_type() {
    let ring: RingSystem<String> =
        RingSystem::create(2, 2, 1, |s: &String| s.len() as i64).unwrap();
    ring.submit("four".to_string(), 1).unwrap();
    assert_eq!(ring.wait_completion(WAIT).unwrap().result_code, 4);
}

#[test]
fn errors_convert_to_io_errors() {
    let cases = [
        (RingError::RingFull, io::ErrorKind::WouldBlock),
        (RingError::TimedOut, io::ErrorKind::TimedOut),
        (RingError::ShuttingDown, io::ErrorKind::BrokenPipe),
        (RingError::ShutDown, io::ErrorKind::BrokenPipe),
        (RingError::InvalidConfig("x"), io::ErrorKind::InvalidInput),
    ];
    for (err, kind) in cases {
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), kind);
        assert_eq!(io_err.to_string(), err.to_string());
    }
}

#[test]
fn debug_output_reports_occupancy() {
    let ring: RingSystem = RingSystem::create(4, 8, 1, immediate).unwrap();
    let text = format!("{:?}", ring);
    println!("RingSystem Struct: {text}");
    assert!(text.contains("Running"));
    assert!(text.contains("submission: 0/4"));
    assert!(text.contains("completion: 0/8"));
}
