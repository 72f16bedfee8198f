mod ad_dto;

pub use ad_dto::{AdListItemDto, AdUpdatedDto, AdUploadedDto, CreateAdDto, UpdateAdDto};
