//! Unit tests for agv-core primitives.

#[cfg(test)]
mod ids {
    use crate::{PointId, SegmentId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = PointId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(PointId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn point_id_is_sixteen_bit() {
        assert!(PointId::try_from(70_000usize).is_err());
        assert_eq!(PointId::INVALID.0, u16::MAX);
    }

    #[test]
    fn ordering() {
        assert!(PointId(0) < PointId(1));
        assert!(SegmentId(100) > SegmentId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(SegmentId::INVALID.0, u32::MAX);
        assert_eq!(VehicleId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{Coord, SimTime};

    #[test]
    fn offset_and_difference() {
        let t = SimTime(10.0);
        assert_eq!(t + 2.5, SimTime(12.5));
        assert_eq!(SimTime(12.5) - t, 2.5);
        assert_eq!(SimTime(12.5).since(t), 2.5);
    }

    #[test]
    fn distant_past_never_smooths() {
        // Any clock value minus the floor stamp is +inf, which clears every
        // finite smooth_factor threshold.
        let gap = SimTime::ZERO - SimTime::DISTANT_PAST;
        assert!(gap > 1e12);
    }

    #[test]
    fn euclidean_distance() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }
}

#[cfg(test)]
mod config {
    use crate::EngineConfig;

    #[test]
    fn default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_smoothing_is_valid() {
        let cfg = EngineConfig { smooth_factor: 0.0, ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn negative_smoothing_rejected() {
        let cfg = EngineConfig { smooth_factor: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_chain_tick_rejected() {
        let cfg = EngineConfig { chain_tick: 0.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_rejected() {
        let cfg = EngineConfig { cold_start_delay: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
