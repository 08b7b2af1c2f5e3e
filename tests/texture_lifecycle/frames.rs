use animtex::prelude::*;

use crate::{BLUE, RED, read_frames};

#[test_log::test]
fn test_sheet_is_cut_in_reading_order() {
	let shared = SharedMipmapLevel::new(1);
	let frames = read_frames(&shared).unwrap();

	assert_eq!(frames.len(), 2);
	assert_eq!(*frames[0].data(), FrameData::new(4, 4, 0, 0));
	assert_eq!(*frames[1].data(), FrameData::new(4, 4, 4, 0));
	assert_eq!(frames[0].image(0).unwrap().color(3, 3), RED);
	assert_eq!(frames[1].image(1).unwrap().color(0, 0), BLUE);
	assert_eq!(shared.subscriber_count(), 2);
}

#[test_log::test]
fn test_factory_failure_aborts_read() {
	let reader = FrameReader::new(|data: FrameData| (data.x_offset() == 0).then_some(data));
	assert!(matches!(reader.read(8, 4, 4, 4), Err(TextureError::MissingFrame {
		index: 1
	})));
}

#[test_log::test]
fn test_lowering_shared_level_releases_mipmaps() {
	let shared = SharedMipmapLevel::new(1);
	let frames = read_frames(&shared).unwrap();

	shared.lower_mipmap_level(0).unwrap();
	for frame in &frames {
		assert_eq!(frame.mipmap_level(), 0);
		assert!(matches!(frame.image(1), Err(TextureError::MipmapLevelAboveCeiling {
			level: 1,
			current: 0
		})));
	}
	assert!(matches!(shared.lower_mipmap_level(1), Err(TextureError::RaiseMipmapLevel {
		requested: 1,
		current: 0
	})));
}

#[test_log::test]
fn test_metadata_orders_frames() {
	let metadata = AnimationMetadata::from_json(r#"{ "frametime": 3, "frames": [1, { "index": 0, "time": 5 }] }"#).unwrap();
	let shared = SharedMipmapLevel::new(1);
	let mut frames: Vec<Option<CloseableImageFrame>> = read_frames(&shared).unwrap().into_iter().map(Some).collect();

	let sequence = metadata.sequence(frames.len()).unwrap();
	let ordered: Vec<_> = sequence.iter().filter_map(|timing| frames[timing.index].take()).collect();
	let manager = AnimationFrameManager::new(ordered, |_| None, 1).unwrap();

	assert_eq!(manager.frames()[0].data().x_offset(), 4);
	assert_eq!(sequence, vec![FrameTiming {
		index: 1,
		time: 3
	}, FrameTiming {
		index: 0,
		time: 5
	}]);
}
