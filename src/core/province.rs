use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a province, matching the `id` attribute carried
/// by the corresponding shape in the map asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvinceId(String);

impl ProvinceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProvinceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProvinceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier -> display name for the regular cases.
static NAMES: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = FxHashMap::default();
    m.insert("AnGiang", "An Giang");
    m.insert("BacGiang", "Bắc Giang");
    m.insert("BacKan", "Bắc Kạn");
    m.insert("BacLieu", "Bạc Liêu");
    m.insert("BacNinh", "Bắc Ninh");
    m.insert("BenTre", "Bến Tre");
    m.insert("BinhDinh", "Bình Định");
    m.insert("BinhDuong", "Bình Dương");
    m.insert("BinhPhuoc", "Bình Phước");
    m.insert("BinhThuan", "Bình Thuận");
    m.insert("CaMau", "Cà Mau");
    m.insert("CanTho", "Cần Thơ");
    m.insert("CaoBang", "Cao Bằng");
    m.insert("DaNang", "Đà Nẵng");
    m.insert("DakLak", "Đắk Lắk");
    m.insert("DakNong", "Đắk Nông");
    m.insert("DienBien", "Điện Biên");
    m.insert("DongNai", "Đồng Nai");
    m.insert("DongThap", "Đồng Tháp");
    m.insert("GiaLai", "Gia Lai");
    m.insert("HaGiang", "Hà Giang");
    m.insert("HaNam", "Hà Nam");
    m.insert("HaNoi", "Hà Nội");
    m.insert("HaTinh", "Hà Tĩnh");
    m.insert("HaiDuong", "Hải Dương");
    m.insert("HaiPhong", "Hải Phòng");
    m.insert("HauGiang", "Hậu Giang");
    m.insert("HoaBinh", "Hòa Bình");
    m.insert("HungYen", "Hưng Yên");
    m.insert("KhanhHoa", "Khánh Hòa");
    m.insert("KienGiang", "Kiên Giang");
    m.insert("KonTum", "Kon Tum");
    m.insert("LaiChau", "Lai Châu");
    m.insert("LamDong", "Lâm Đồng");
    m.insert("LangSon", "Lạng Sơn");
    m.insert("LaoCai", "Lào Cai");
    m.insert("LongAn", "Long An");
    m.insert("NamDinh", "Nam Định");
    m.insert("NgheAn", "Nghệ An");
    m.insert("NinhBinh", "Ninh Bình");
    m.insert("NinhThuan", "Ninh Thuận");
    m.insert("PhuTho", "Phú Thọ");
    m.insert("PhuYen", "Phú Yên");
    m.insert("QuangBinh", "Quảng Bình");
    m.insert("QuangNam", "Quảng Nam");
    m.insert("QuangNgai", "Quảng Ngãi");
    m.insert("QuangNinh", "Quảng Ninh");
    m.insert("QuangTri", "Quảng Trị");
    m.insert("SocTrang", "Sóc Trăng");
    m.insert("SonLa", "Sơn La");
    m.insert("TayNinh", "Tây Ninh");
    m.insert("ThaiBinh", "Thái Bình");
    m.insert("ThaiNguyen", "Thái Nguyên");
    m.insert("ThanhHoa", "Thanh Hóa");
    m.insert("TienGiang", "Tiền Giang");
    m.insert("TraVinh", "Trà Vinh");
    m.insert("TuyenQuang", "Tuyên Quang");
    m.insert("VinhLong", "Vĩnh Long");
    m.insert("VinhPhuc", "Vĩnh Phúc");
    m.insert("YenBai", "Yên Bái");
    m
});

/// Irregular and merged administrative regions whose display names do not
/// follow the regular pattern.
static OVERRIDES: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = FxHashMap::default();
    m.insert("HoChiMinh", "TP. Hồ Chí Minh");
    m.insert("BaRiaVungTau", "Bà Rịa – Vũng Tàu");
    m.insert("ThuaThienHue", "Thừa Thiên Huế");
    m.insert("HoangSa", "Quần đảo Hoàng Sa");
    m.insert("TruongSa", "Quần đảo Trường Sa");
    m
});

/// Resolves a province identifier to its display name.
///
/// Overrides win over the regular table; an unknown identifier falls back
/// to a normalized form of the raw id rather than failing.
pub fn display_name(id: &ProvinceId) -> String {
    if let Some(name) = OVERRIDES.get(id.as_str()) {
        return (*name).to_string();
    }
    if let Some(name) = NAMES.get(id.as_str()) {
        return (*name).to_string();
    }
    log::debug!("no display name for province {}, normalizing id", id);
    normalize_id(id.as_str())
}

/// Splits a camel-case identifier into space-separated words
/// ("QuangNinh" -> "Quang Ninh").
pub fn normalize_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    for (i, ch) in id.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_lookup() {
        assert_eq!(display_name(&ProvinceId::from("DaNang")), "Đà Nẵng");
        assert_eq!(display_name(&ProvinceId::from("HaNoi")), "Hà Nội");
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(
            display_name(&ProvinceId::from("HoChiMinh")),
            "TP. Hồ Chí Minh"
        );
        assert_eq!(
            display_name(&ProvinceId::from("BaRiaVungTau")),
            "Bà Rịa – Vũng Tàu"
        );
    }

    #[test]
    fn test_unknown_id_normalized() {
        assert_eq!(display_name(&ProvinceId::from("PhuQuoc")), "Phu Quoc");
        assert_eq!(normalize_id("X"), "X");
        assert_eq!(normalize_id(""), "");
    }
}
