//! Deterministic full-size dataset for tests: real surah lengths and names,
//! the real text of Al-Fatiha, and evenly spread page/quarter/hizb/juz
//! partitions. Also compiled into the integration tests.

use serde_json::{json, Value};

pub const SURAH_LENGTHS: [u32; 114] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, 123, 111, 43, 52, 99, 128, 111, 110, 98, 135,
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, 34, 30, 73, 54, 45, 83, 182, 88, 75, 85, 54, 53,
    89, 59, 37, 35, 38, 29, 18, 45, 60, 49, 62, 55, 78, 96, 29, 22, 24, 13, 14, 11, 11, 18, 12,
    12, 30, 52, 52, 44, 28, 28, 20, 56, 40, 31, 50, 40, 46, 42, 29, 19, 36, 25, 22, 17, 19, 26,
    30, 20, 15, 21, 11, 8, 8, 19, 5, 8, 8, 11, 11, 8, 3, 9, 5, 4, 7, 3, 6, 3, 5, 4, 5, 6,
];

pub const SURAH_NAMES: [&str; 114] = [
    "الفاتحة", "البقرة", "آل عمران", "النساء", "المائدة", "الأنعام", "الأعراف", "الأنفال",
    "التوبة", "يونس", "هود", "يوسف", "الرعد", "إبراهيم", "الحجر", "النحل", "الإسراء", "الكهف",
    "مريم", "طه", "الأنبياء", "الحج", "المؤمنون", "النور", "الفرقان", "الشعراء", "النمل",
    "القصص", "العنكبوت", "الروم", "لقمان", "السجدة", "الأحزاب", "سبأ", "فاطر", "يس",
    "الصافات", "ص", "الزمر", "غافر", "فصلت", "الشورى", "الزخرف", "الدخان", "الجاثية",
    "الأحقاف", "محمد", "الفتح", "الحجرات", "ق", "الذاريات", "الطور", "النجم", "القمر",
    "الرحمن", "الواقعة", "الحديد", "المجادلة", "الحشر", "الممتحنة", "الصف", "الجمعة",
    "المنافقون", "التغابن", "الطلاق", "التحريم", "الملك", "القلم", "الحاقة", "المعارج", "نوح",
    "الجن", "المزمل", "المدثر", "القيامة", "الإنسان", "المرسلات", "النبأ", "النازعات", "عبس",
    "التكوير", "الانفطار", "المطففين", "الانشقاق", "البروج", "الطارق", "الأعلى", "الغاشية",
    "الفجر", "البلد", "الشمس", "الليل", "الضحى", "الشرح", "التين", "العلق", "القدر", "البينة",
    "الزلزلة", "العاديات", "القارعة", "التكاثر", "العصر", "الهمزة", "الفيل", "قريش", "الماعون",
    "الكوثر", "الكافرون", "النصر", "المسد", "الإخلاص", "الفلق", "الناس",
];

pub const FATIHA: [&str; 7] = [
    "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
    "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ",
    "ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
    "مَٰلِكِ يَوْمِ ٱلدِّينِ",
    "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ",
    "ٱهْدِنَا ٱلصِّرَٰطَ ٱلْمُسْتَقِيمَ",
    "صِرَٰطَ ٱلَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ ٱلْمَغْضُوبِ عَلَيْهِمْ وَلَا ٱلضَّآلِّينَ",
];

/// Text used for every verse after Al-Fatiha, picked by `absolute % 6`
pub const FILLER: [&str; 6] = [
    "إِنَّ ٱللَّهَ غَفُورٌ رَّحِيمٌ",
    "وَٱللَّهُ بِمَا تَعْمَلُونَ بَصِيرٌ",
    "يَٰٓأَيُّهَا ٱلنَّاسُ ٱعْبُدُوا۟ رَبَّكُمُ",
    "وَأَقِيمُوا۟ ٱلصَّلَوٰةَ وَءَاتُوا۟ ٱلزَّكَوٰةَ",
    "فَبِأَىِّ ءَالَآءِ رَبِّكُمَا تُكَذِّبَانِ",
    "قُلْ هُوَ ٱللَّهُ أَحَدٌ",
];

pub const TOTAL: u32 = 6236;

pub fn text_of(absolute: u32) -> &'static str {
    if absolute <= 7 {
        FATIHA[absolute as usize - 1]
    } else {
        FILLER[absolute as usize % FILLER.len()]
    }
}

pub fn page_of(absolute: u32) -> u32 {
    (absolute - 1) * 604 / TOTAL + 1
}

pub fn quarter_of(absolute: u32) -> u32 {
    (absolute - 1) * 240 / TOTAL + 1
}

pub fn hizb_of(absolute: u32) -> u32 {
    (quarter_of(absolute) - 1) / 4 + 1
}

pub fn juz_of(absolute: u32) -> u32 {
    (hizb_of(absolute) - 1) / 2 + 1
}

/// First absolute verse of each surah, indexed by `surah_id - 1`
pub fn surah_starts() -> Vec<u32> {
    let mut starts = Vec::with_capacity(SURAH_LENGTHS.len());
    let mut next = 1;
    for len in SURAH_LENGTHS {
        starts.push(next);
        next += len;
    }
    starts
}

pub fn records() -> Vec<Value> {
    let mut records = Vec::with_capacity(TOTAL as usize);
    let mut absolute = 1;
    for (i, len) in SURAH_LENGTHS.iter().enumerate() {
        for number_in_surah in 1..=*len {
            records.push(json!({
                "absolute_number": absolute,
                "surah_id": i + 1,
                "surah_name": SURAH_NAMES[i],
                "number_in_surah": number_in_surah,
                "page": page_of(absolute),
                "quarter": quarter_of(absolute),
                "hizb": hizb_of(absolute),
                "juz": juz_of(absolute),
                "text": text_of(absolute),
            }));
            absolute += 1;
        }
    }
    records
}

pub fn dataset_json() -> String {
    json!({ "verses": records() }).to_string()
}

/// The fixture deserialized into the caller's verse type
pub fn verses<T: serde::de::DeserializeOwned>() -> Vec<T> {
    records()
        .into_iter()
        .map(|record| serde_json::from_value(record).expect("fixture record"))
        .collect()
}
