//! Indonesian stopwords for phrase and word-frequency analysis.

use std::collections::HashSet;
use std::sync::LazyLock;

/// General Indonesian function words.
const BASE: &[&str] = &[
    "ada", "adalah", "adanya", "agak", "agar", "akan", "akankah", "akhirnya", "aku", "amat",
    "anda", "andalah", "antar", "antara", "apa", "apaan", "apabila", "apakah", "apalagi",
    "atau", "ataupun", "bagai", "bagaimana", "bagaimanakah", "bagi", "bahkan", "bahwa",
    "baik", "banyak", "barangkali", "baru", "begini", "begitu", "belum", "benar", "berapa",
    "berikut", "bersama", "betul", "biasa", "bila", "bisa", "boleh", "bukan", "bukankah",
    "cara", "cukup", "dahulu", "dalam", "dan", "dapat", "dari", "daripada", "dekat",
    "demi", "demikian", "dengan", "depan", "di", "dia", "diri", "dirinya", "dong", "dulu",
    "engkau", "hal", "hampir", "hanya", "harus", "hingga", "ia", "ialah", "ini", "inilah",
    "itu", "itulah", "jadi", "jika", "jikalau", "juga", "jumlah", "justru", "kala", "kalau",
    "kalian", "kami", "kamu", "kan", "kapan", "karena", "kasus", "ke", "kecil", "kelamaan",
    "kembali", "kemudian", "kenapa", "kepada", "kepadanya", "ketika", "kini", "kita",
    "lagi", "lain", "lalu", "lama", "lebih", "maka", "makin", "malah", "mana", "masih",
    "masing", "mau", "melainkan", "melalui", "memang", "mereka", "merupakan", "meski",
    "misalnya", "mungkin", "namun", "nanti", "oleh", "pada", "padahal", "para", "pasti",
    "per", "perlu", "pernah", "pula", "pun", "saat", "saja", "sama", "sambil", "sampai",
    "sana", "sangat", "saya", "se", "sebab", "sebagai", "sebelum", "sebuah", "sedang",
    "sedangkan", "sejak", "sekali", "sekarang", "selagi", "selain", "selalu", "seluruh",
    "semakin", "sementara", "semua", "sendiri", "seperti", "sering", "serta", "sesudah",
    "setelah", "setiap", "siapa", "sini", "sudah", "supaya", "tadi", "tanpa", "tapi",
    "telah", "tentang", "tentu", "terhadap", "terjadi", "tersebut", "tetapi", "tiap",
    "tidak", "toh", "untuk", "walau", "walaupun", "ya", "yaitu", "yakni", "yang",
];

/// Colloquial and abbreviated forms common in comment sections.
const EXTRA: &[&str] = &[
    "yang", "ini", "itu", "ada", "dari", "untuk", "dengan", "juga", "pada", "sudah", "akan",
    "kami", "kita", "saya", "nya", "agar", "bisa", "tidak", "tak", "tdk", "ga", "gak", "aja",
    "lagi", "kok", "apa", "yg", "lu", "gk", "dr", "dlm", "trs", "jd", "lah", "si", "nih",
    "loh", "deh", "jangan", "klu", "kalo", "semua", "ayo", "dgn",
];

static PHRASE_STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BASE.iter().copied().collect());

static EXTENDED_STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BASE.iter().chain(EXTRA).copied().collect());

/// Stopwords removed before counting phrases.
pub fn phrase_stopwords() -> &'static HashSet<&'static str> {
    &PHRASE_STOPWORDS
}

/// Phrase stopwords plus colloquial forms, used for word frequencies.
pub fn extended_stopwords() -> &'static HashSet<&'static str> {
    &EXTENDED_STOPWORDS
}
